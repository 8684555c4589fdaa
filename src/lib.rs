//! ZenBudget - daily expense tracking with monthly carry-over
//!
//! Each day's spending is logged against a monthly budget. Whatever is left
//! (or overspent) at the end of a month carries into the next, and the chain
//! restarts every January. Fixed monthly expenses such as rent and bills are
//! tracked against their own budget and never affect the carry-over.
//!
//! # Architecture
//!
//! - `models`: Money, calendar keys, fixed expenses and the per-user document
//! - `engine`: Pure carry-over calculation and month/year summaries
//! - `services`: State patches, insights and receipt scanning
//! - `storage`: JSON document store, debounced sync and observers
//! - `audit`: Append-only change log
//! - `export`: CSV and JSON export
//! - `reports` / `display`: Terminal and CSV rendering
//! - `cli`: Command handlers for the `zenbudget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use zenbudget::engine::{calculate_year_data, get_monthly_summary};
//! use zenbudget::models::BudgetState;
//!
//! let state = BudgetState::default();
//! let data = calculate_year_data(2025, &state);
//! let march = get_monthly_summary(2025, 3, &state, &data);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default log filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "zenbudget=warn";

/// Initializes the global tracing subscriber, logging to stderr
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
