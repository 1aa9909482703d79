use thiserror::Error;

use crate::domain::EntryId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Amount must not be negative: '{0}'")]
    NegativeAmount(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Persistence error: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl AppError {
    /// True for the add-validation family (bad date, category or amount).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::EmptyCategory
                | AppError::InvalidAmount { .. }
                | AppError::NegativeAmount(_)
        )
    }
}
