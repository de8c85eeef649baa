use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Total;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Total,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Total,
    pub count: usize,
    pub average: Total,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Total,
    pub count: usize,
}

/// Result of checking the ledger's containers against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub expense_count: usize,
    pub undo_depth: usize,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Share of `part` in `total`, as a percentage. Zero when there is no total.
pub(crate) fn percentage_of(part: Total, total: Total) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
