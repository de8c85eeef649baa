// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::Result;
use chrono::NaiveDate;
use tally::application::ExpenseLedger;
use tally::cli::Cli;
use tally::domain::ExpenseId;

/// Helper to create a ledger with the standard categories: food, travel, rent
pub fn test_ledger() -> ExpenseLedger {
    ExpenseLedger::initialize(3, &["food", "travel", "rent"]).unwrap()
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Everything observable about a ledger's containers, with ids in
/// canonical order so two snapshots compare as multisets.
#[derive(Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub expenses: Vec<ExpenseId>,
    pub by_category: HashMap<String, Vec<ExpenseId>>,
    pub by_date: HashMap<NaiveDate, Vec<ExpenseId>>,
    pub undo_depth: usize,
}

impl LedgerSnapshot {
    pub fn take(ledger: &ExpenseLedger) -> Self {
        let expenses: Vec<ExpenseId> = ledger.list_all_expenses().iter().map(|e| e.id).collect();

        let mut by_category = HashMap::new();
        for category in ledger.categories().distinct() {
            let mut ids: Vec<ExpenseId> = ledger
                .expenses_in_category(category)
                .iter()
                .map(|e| e.id)
                .collect();
            ids.sort_unstable();
            if !ids.is_empty() {
                by_category.insert(category.to_string(), ids);
            }
        }

        let mut by_date = HashMap::new();
        for expense in ledger.list_all_expenses() {
            by_date.entry(expense.date).or_insert_with(|| {
                let mut ids: Vec<ExpenseId> =
                    ledger.expenses_on(expense.date).iter().map(|e| e.id).collect();
                ids.sort_unstable();
                ids
            });
        }

        Self {
            expenses,
            by_category,
            by_date,
            undo_depth: ledger.undo_depth(),
        }
    }
}

/// Test fixture: standard expense set across categories and dates
pub struct StandardExpenses;

impl StandardExpenses {
    pub fn record(ledger: &mut ExpenseLedger) -> Result<()> {
        ledger.add_expense(50, "food", "2024-01-15", "lunch")?;
        ledger.add_expense(300, "travel", "2024-01-15", "flight")?;
        ledger.add_expense(25, "food", "2024-01-16", "groceries")?;
        ledger.add_expense(900, "rent", "2024-02-01", "february")?;
        Ok(())
    }
}

/// Run a whole session with scripted input and return the transcript.
pub fn run_session(cli: &Cli, input: &str) -> Result<String> {
    let mut output = Vec::new();
    cli.run_session(Cursor::new(input.as_bytes()), &mut output)?;
    Ok(String::from_utf8(output)?)
}

/// Session with the startup prompt answered from `input` too.
pub fn run_interactive(input: &str) -> Result<String> {
    run_session(&Cli::default(), input)
}
