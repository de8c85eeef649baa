use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::domain::{Expense, ExpenseId};

/// Statistics for index consistency verification.
#[derive(Debug, Clone, Default)]
pub struct IntegrityStats {
    pub expense_count: usize,
    pub category_indexed: usize,
    pub date_indexed: usize,
    /// Index entries pointing at an id that is not in the expense list
    pub dangling_refs: Vec<ExpenseId>,
    /// Expenses filed under a bucket that does not match their own fields
    pub misfiled: Vec<ExpenseId>,
    /// Ids appearing more than once in the expense list
    pub duplicate_ids: Vec<ExpenseId>,
    pub empty_buckets: usize,
}

/// In-memory store for expenses and their secondary indices.
///
/// The expense list is the source of truth. The category and date indices
/// hold ids into it and are updated in lockstep by `save_expense` and
/// `remove_expense`; nothing else mutates them.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    by_category: HashMap<String, Vec<ExpenseId>>,
    by_date: BTreeMap<NaiveDate, Vec<ExpenseId>>,
    next_sequence: ExpenseId,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Writes
    // ========================

    /// Store a new expense. Assigns the next sequence id, overwriting
    /// whatever id the caller put on it.
    pub fn save_expense(&mut self, mut expense: Expense) -> &Expense {
        self.next_sequence += 1;
        expense.id = self.next_sequence;

        self.by_category
            .entry(expense.category.clone())
            .or_default()
            .push(expense.id);
        self.by_date.entry(expense.date).or_default().push(expense.id);

        self.expenses.push(expense);
        &self.expenses[self.expenses.len() - 1]
    }

    /// Remove an expense from the list and both indices.
    /// Buckets left empty are dropped.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|e| e.id == id)?;
        let expense = self.expenses.remove(position);

        if let Some(bucket) = self.by_category.get_mut(&expense.category) {
            remove_id(bucket, id);
            if bucket.is_empty() {
                self.by_category.remove(&expense.category);
            }
        }

        if let Some(bucket) = self.by_date.get_mut(&expense.date) {
            remove_id(bucket, id);
            if bucket.is_empty() {
                self.by_date.remove(&expense.date);
            }
        }

        Some(expense)
    }

    // ========================
    // Reads
    // ========================

    pub fn get_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// All expenses in the order they were recorded.
    pub fn list_expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expenses_in_category(&self, category: &str) -> Vec<&Expense> {
        self.by_category
            .get(category)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    pub fn expenses_on(&self, date: NaiveDate) -> Vec<&Expense> {
        self.by_date
            .get(&date)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    /// Dates that have at least one expense, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Get statistics for integrity checking.
    pub fn integrity_stats(&self) -> IntegrityStats {
        let mut stats = IntegrityStats {
            expense_count: self.expenses.len(),
            ..IntegrityStats::default()
        };

        let mut seen: HashMap<ExpenseId, usize> = HashMap::new();
        for expense in &self.expenses {
            *seen.entry(expense.id).or_insert(0) += 1;
        }
        stats.duplicate_ids = seen
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| *id)
            .collect();
        stats.duplicate_ids.sort_unstable();

        for (category, ids) in &self.by_category {
            if ids.is_empty() {
                stats.empty_buckets += 1;
            }
            for id in ids {
                stats.category_indexed += 1;
                match self.get_expense(*id) {
                    None => stats.dangling_refs.push(*id),
                    Some(e) if e.category != *category => stats.misfiled.push(*id),
                    Some(_) => {}
                }
            }
        }

        for (date, ids) in &self.by_date {
            if ids.is_empty() {
                stats.empty_buckets += 1;
            }
            for id in ids {
                stats.date_indexed += 1;
                match self.get_expense(*id) {
                    None => stats.dangling_refs.push(*id),
                    Some(e) if e.date != *date => stats.misfiled.push(*id),
                    Some(_) => {}
                }
            }
        }

        stats
    }

    fn resolve(&self, ids: &[ExpenseId]) -> Vec<&Expense> {
        ids.iter().filter_map(|id| self.get_expense(*id)).collect()
    }
}

/// Remove the first occurrence of `id`.
fn remove_id(bucket: &mut Vec<ExpenseId>, id: ExpenseId) {
    if let Some(pos) = bucket.iter().position(|i| *i == id) {
        bucket.remove(pos);
    }
}
