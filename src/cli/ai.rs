//! Insight and receipt scanning commands

use std::path::Path;

use super::session::{parse_date_arg, year_or_current, Session};
use crate::error::{BudgetError, BudgetResult};
use crate::services::{
    insight_or_fallback, mime_type_for, ExpenseService, HttpAiClient, InsightGenerator,
    InsightRequest, ReceiptScanner,
};

/// Print spending advice for a year
pub fn handle_insight(session: &Session, year: Option<i32>) -> BudgetResult<()> {
    let year = year_or_current(year);
    let request = InsightRequest::from_state(session.state(), year, session.currency());

    let client = match HttpAiClient::from_settings(&session.settings.ai) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "could not build AI client");
            None
        }
    };
    let generator = client.as_ref().map(|c| c as &dyn InsightGenerator);

    println!("{}", insight_or_fallback(generator, &request));
    Ok(())
}

/// Scan a receipt image and add it to a day's spending
pub fn handle_scan(session: &mut Session, image: &Path, date: Option<&str>) -> BudgetResult<()> {
    let date = parse_date_arg(date)?;
    let mime_type = mime_type_for(image)?;
    let bytes = std::fs::read(image)
        .map_err(|e| BudgetError::Io(format!("Failed to read {}: {}", image.display(), e)))?;

    let client = HttpAiClient::from_settings(&session.settings.ai)?.ok_or_else(|| {
        BudgetError::Config(
            "Receipt scanning needs an AI endpoint in config.json and ZENBUDGET_AI_KEY".into(),
        )
    })?;

    let receipt = client.scan(&bytes, mime_type)?;
    let patch = ExpenseService::new(session.state()).add_to_expense(
        &date,
        receipt.amount,
        &receipt.expense_note(),
    )?;
    session.commit(patch);

    println!(
        "Scanned {} ({}) for {}",
        receipt.amount.format_with_symbol(session.currency()),
        receipt.expense_note(),
        date
    );
    Ok(())
}
