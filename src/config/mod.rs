//! Configuration module for ZenBudget
//!
//! - Platform path resolution
//! - Local settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
