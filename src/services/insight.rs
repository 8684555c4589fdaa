//! Spending insights
//!
//! Builds the advisor prompt from a year's expenses and hands it to an
//! [`InsightGenerator`]. Generation failures become a fixed fallback message
//! and never touch the budget state.

use crate::error::BudgetResult;
use crate::models::{BudgetState, Money};

/// How many of the year's most recent expenses go into the prompt
pub const INSIGHT_EXPENSE_WINDOW: usize = 30;

pub const INSIGHT_FALLBACK: &str = "Could not generate insights at the moment.";

pub const INSIGHT_NOT_CONFIGURED: &str =
    "Please configure the ZENBUDGET_AI_KEY environment variable and an AI endpoint to use AI features.";

/// Produces advice text from a prompt
pub trait InsightGenerator {
    fn generate(&self, request: &InsightRequest) -> BudgetResult<String>;
}

/// Everything the advisor prompt is built from
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub display_name: String,
    pub monthly_budget: Money,
    pub currency_symbol: String,
    /// `(date key, amount)` in date order
    pub expenses: Vec<(String, Money)>,
}

impl InsightRequest {
    /// The last [`INSIGHT_EXPENSE_WINDOW`] expenses logged in `year`
    pub fn from_state(state: &BudgetState, year: i32, currency_symbol: &str) -> Self {
        let in_year: Vec<(String, Money)> = state
            .expenses_in_year(year)
            .map(|(date, amount)| (date.clone(), *amount))
            .collect();
        let skip = in_year.len().saturating_sub(INSIGHT_EXPENSE_WINDOW);

        Self {
            display_name: state.greeting_name().to_string(),
            monthly_budget: state.default_monthly_budget,
            currency_symbol: currency_symbol.to_string(),
            expenses: in_year.into_iter().skip(skip).collect(),
        }
    }

    /// Render the advisor prompt
    pub fn prompt(&self) -> String {
        let symbol = &self.currency_symbol;
        let data = self
            .expenses
            .iter()
            .map(|(date, amount)| format!("{}: {}{}", date, symbol, amount))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are a financial advisor for {name}. Here is their recent expense data \
             (Date: Amount) for a monthly budget of roughly {symbol}{budget}.\n\
             Expenses cover food, travel, and movies only.\n\
             Data: [{data}].\n\
             Analyze the spending pattern. Are they on track to stay under {symbol}{budget} this month? \
             Give 1 short, actionable tip in 2 sentences max. Address them by name.\n\
             Prefix any monetary values in your response with {symbol}.",
            name = self.display_name,
            symbol = symbol,
            budget = self.monthly_budget,
            data = data,
        )
    }
}

/// Generate an insight, degrading to a fixed message on any failure
pub fn insight_or_fallback(
    generator: Option<&dyn InsightGenerator>,
    request: &InsightRequest,
) -> String {
    let Some(generator) = generator else {
        return INSIGHT_NOT_CONFIGURED.to_string();
    };

    match generator.generate(request) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => INSIGHT_FALLBACK.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "insight generation failed");
            INSIGHT_FALLBACK.to_string()
        }
    }
}
