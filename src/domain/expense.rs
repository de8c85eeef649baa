use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amount, format_expense_date};

/// Sequence number assigned by the ledger when an expense is recorded.
/// Unique for the lifetime of a ledger, never reused after an undo.
pub type ExpenseId = u64;

/// A single recorded spending entry. Expenses are immutable: the only way
/// to get rid of one is to undo the add that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Amount,
    /// Always lowercase
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        amount: Amount,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
            description: description.into(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Amount: {}, Category: {}, Date: {}, Description: {}",
            self.amount,
            self.category,
            format_expense_date(self.date),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_display_line() {
        let expense = Expense::new(1, 50, "food", jan(15), "lunch");
        assert_eq!(
            expense.to_string(),
            "Amount: 50, Category: food, Date: 2024-01-15, Description: lunch"
        );
    }

    #[test]
    fn test_display_empty_description() {
        let expense = Expense::new(1, 0, "food", jan(5), "");
        assert_eq!(
            expense.to_string(),
            "Amount: 0, Category: food, Date: 2024-01-05, Description: "
        );
    }

    #[test]
    fn test_identity_differs_from_fields() {
        let a = Expense::new(1, 50, "food", jan(15), "lunch");
        let b = Expense::new(2, 50, "food", jan(15), "lunch");
        assert_eq!(Expense { id: 2, ..a.clone() }, b);
        assert_ne!(a, b);
    }
}
