//! Business logic layer for ZenBudget
//!
//! State edits, spending insights and receipt scanning. The calculation
//! engine itself lives in [`crate::engine`].

pub mod ai;
pub mod expense;
pub mod insight;
pub mod receipt;

pub use ai::HttpAiClient;
pub use expense::{ExpenseService, Patch};
pub use insight::{
    insight_or_fallback, InsightGenerator, InsightRequest, INSIGHT_FALLBACK,
    INSIGHT_NOT_CONFIGURED,
};
pub use receipt::{mime_type_for, ReceiptData, ReceiptScanner};
