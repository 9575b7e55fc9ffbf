//! Error types for the dashboard

use thiserror::Error;

use crate::ledger::Category;

/// Rejection of a form submission. Nothing in the ledger changes when one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", .0.invalid_prompt())]
    MissingAmount(Category),

    #[error("{}", .0.invalid_prompt())]
    InvalidAmount(Category),

    #[error("{}", .0.invalid_prompt())]
    NonPositiveAmount(Category),

    /// Accepting the amount would overflow a category total or the balance.
    #[error("{}", .0.invalid_prompt())]
    AmountTooLarge(Category),

    #[error("Please enter a valid loan amount and due date")]
    MissingDueDate,

    #[error("Please enter a valid loan amount and due date")]
    InvalidDueDate { value: String },

    #[error("No loan at position {index} (only {len} recorded)")]
    LoanIndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Non-success status; carries the server's message verbatim.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Authentication succeeded but no token was returned")]
    MissingToken,

    #[error("Network error")]
    Transport(String),

    #[error("Could not store the session token")]
    Storage(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid dashboard configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
