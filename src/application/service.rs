use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{
    Amount, CategorySet, Expense, ExpenseId, Total, normalize_category, parse_expense_date,
    sum_amounts,
};
use crate::storage::ExpenseStore;

use super::reporting::percentage_of;
use super::{CategoryReport, CategorySummary, DailyTotal, IntegrityReport, LedgerError};

/// The expense ledger: owns the category set, every recorded expense with
/// its indices, and the undo history.
/// This is the only interface the shell talks to.
#[derive(Debug)]
pub struct ExpenseLedger {
    categories: CategorySet,
    store: ExpenseStore,
    undo_history: Vec<ExpenseId>,
}

impl ExpenseLedger {
    /// Create a ledger over an already-built category set.
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            store: ExpenseStore::new(),
            undo_history: Vec::new(),
        }
    }

    /// Create a ledger from `count` category names, as entered at startup.
    /// The count must be positive and match the number of names given.
    pub fn initialize<S: AsRef<str>>(count: usize, names: &[S]) -> Result<Self, LedgerError> {
        if count == 0 || names.len() != count {
            return Err(LedgerError::InvalidCategoryCount {
                expected: count,
                actual: names.len(),
            });
        }

        let categories: CategorySet = names.iter().collect();
        debug!(count = categories.len(), "categories initialized");
        Ok(Self::new(categories))
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense.
    ///
    /// The category is lowercased before the membership check. The date must
    /// be a real calendar day written as `YYYY-MM-DD`. Amount and
    /// description are taken as given.
    pub fn add_expense(
        &mut self,
        amount: Amount,
        category: &str,
        date: &str,
        description: &str,
    ) -> Result<Expense, LedgerError> {
        let category = self.check_category(category)?;
        let date = Self::check_date(date)?;

        let expense = self
            .store
            .save_expense(Expense::new(0, amount, category, date, description))
            .clone();
        self.undo_history.push(expense.id);

        debug!(id = expense.id, amount, category = %expense.category, %date, "expense added");
        Ok(expense)
    }

    /// Lowercase a category name and confirm it is one of the defined
    /// categories.
    pub fn check_category(&self, category: &str) -> Result<String, LedgerError> {
        let category = normalize_category(category);
        if self.categories.contains(&category) {
            Ok(category)
        } else {
            Err(LedgerError::InvalidCategory {
                category,
                available: self.categories.clone(),
            })
        }
    }

    pub fn check_date(date: &str) -> Result<NaiveDate, LedgerError> {
        parse_expense_date(date).map_err(LedgerError::InvalidDate)
    }

    /// Undo the most recent add, removing that exact expense from the
    /// ledger. Returns the removed expense.
    pub fn undo_last_action(&mut self) -> Result<Expense, LedgerError> {
        loop {
            let id = self.undo_history.pop().ok_or(LedgerError::NothingToUndo)?;

            match self.store.remove_expense(id) {
                Some(expense) => {
                    debug!(id, "expense removed by undo");
                    return Ok(expense);
                }
                // Only possible if the store changed behind the ledger's back.
                None => warn!(id, "undo history referenced a missing expense"),
            }
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn list_categories(&self) -> &[String] {
        self.categories.names()
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// All expenses in the order they were entered.
    pub fn list_all_expenses(&self) -> &[Expense] {
        self.store.list_expenses()
    }

    pub fn expenses_in_category(&self, category: &str) -> Vec<&Expense> {
        self.store.expenses_in_category(&normalize_category(category))
    }

    pub fn expenses_on(&self, date: NaiveDate) -> Vec<&Expense> {
        self.store.expenses_on(date)
    }

    /// Number of adds that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo_history.len()
    }

    // ========================
    // Reports
    // ========================

    /// Spending per category, one row per distinct category in the order
    /// the categories were defined.
    pub fn category_spending(&self) -> CategoryReport {
        let expenses = self.store.list_expenses();
        let total = sum_amounts(expenses.iter().map(|e| e.amount));

        let categories = self
            .categories
            .distinct()
            .into_iter()
            .map(|category| {
                let in_category = self.store.expenses_in_category(category);
                let count = in_category.len();
                let category_total = sum_amounts(in_category.iter().map(|e| e.amount));
                let average = if count == 0 {
                    0
                } else {
                    category_total / count as Total
                };

                CategorySummary {
                    category: category.to_string(),
                    total: category_total,
                    count,
                    average,
                    percentage: percentage_of(category_total, total),
                }
            })
            .collect();

        CategoryReport {
            categories,
            total,
            count: expenses.len(),
        }
    }

    /// Spending per calendar day, oldest first.
    pub fn daily_spending(&self) -> Vec<DailyTotal> {
        self.store
            .dates()
            .map(|date| {
                let on_day = self.store.expenses_on(date);
                DailyTotal {
                    date,
                    total: sum_amounts(on_day.iter().map(|e| e.amount)),
                    count: on_day.len(),
                }
            })
            .collect()
    }

    // ========================
    // Integrity operations
    // ========================

    /// Check that the expense list, both indices and the undo history agree.
    pub fn check_integrity(&self) -> IntegrityReport {
        let stats = self.store.integrity_stats();
        let mut issues = Vec::new();

        if stats.category_indexed != stats.expense_count {
            issues.push(format!(
                "category index holds {} entries for {} expenses",
                stats.category_indexed, stats.expense_count
            ));
        }
        if stats.date_indexed != stats.expense_count {
            issues.push(format!(
                "date index holds {} entries for {} expenses",
                stats.date_indexed, stats.expense_count
            ));
        }
        for id in &stats.dangling_refs {
            issues.push(format!("index references missing expense #{}", id));
        }
        for id in &stats.misfiled {
            issues.push(format!("expense #{} is filed under the wrong key", id));
        }
        for id in &stats.duplicate_ids {
            issues.push(format!("expense #{} appears more than once", id));
        }
        if stats.empty_buckets > 0 {
            issues.push(format!("{} empty index bucket(s)", stats.empty_buckets));
        }

        let mut history_counts: HashMap<ExpenseId, usize> = HashMap::new();
        for id in &self.undo_history {
            *history_counts.entry(*id).or_insert(0) += 1;
        }
        for (id, count) in &history_counts {
            if *count > 1 {
                issues.push(format!("undo history holds expense #{} {} times", id, count));
            }
            if self.store.get_expense(*id).is_none() {
                issues.push(format!("undo history references missing expense #{}", id));
            }
        }
        if self.undo_history.len() != stats.expense_count {
            issues.push(format!(
                "undo history holds {} entries for {} expenses",
                self.undo_history.len(),
                stats.expense_count
            ));
        }

        for issue in &issues {
            warn!(%issue, "ledger integrity issue");
        }

        IntegrityReport {
            expense_count: stats.expense_count,
            undo_depth: self.undo_history.len(),
            issues,
        }
    }
}
