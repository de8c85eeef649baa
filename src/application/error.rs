use thiserror::Error;

use crate::domain::{CategorySet, ParseDateError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid category. Available categories are: {available}")]
    InvalidCategory {
        category: String,
        available: CategorySet,
    },

    #[error("Invalid date format. Please enter a valid date in the format YYYY-MM-DD.")]
    InvalidDate(#[source] ParseDateError),

    #[error("No actions to undo.")]
    NothingToUndo,

    #[error("Expected {expected} category names, got {actual}")]
    InvalidCategoryCount { expected: usize, actual: usize },
}
