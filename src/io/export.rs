use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::ExpenseLedger;
use crate::domain::{Expense, format_expense_date};

/// Session snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub categories: Vec<String>,
    pub expenses: Vec<Expense>,
}

/// Output formats understood by `--export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Exporter for writing the session's expenses out
pub struct Exporter<'a> {
    ledger: &'a ExpenseLedger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a ExpenseLedger) -> Self {
        Self { ledger }
    }

    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_expenses_csv(writer),
            ExportFormat::Json => self.export_session_json(writer),
        }
    }

    /// Export expenses to CSV, one row per expense in entry order
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "amount", "category", "date", "description"])?;

        let mut count = 0;
        for expense in self.ledger.list_all_expenses() {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.amount.to_string(),
                expense.category.clone(),
                format_expense_date(expense.date),
                expense.description.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export categories and expenses as a single JSON document
    pub fn export_session_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = SessionSnapshot {
            categories: self.ledger.list_categories().to_vec(),
            expenses: self.ledger.list_all_expenses().to_vec(),
        };

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        Ok(snapshot.expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> ExpenseLedger {
        let mut ledger = ExpenseLedger::initialize(2, &["food", "travel"]).unwrap();
        ledger
            .add_expense(50, "food", "2024-01-15", "lunch, with Sam")
            .unwrap();
        ledger
            .add_expense(120, "travel", "2024-01-16", "train")
            .unwrap();
        ledger
    }

    #[test]
    fn test_csv_export() {
        let ledger = sample_ledger();
        let mut out = Vec::new();
        let count = Exporter::new(&ledger)
            .export(ExportFormat::Csv, &mut out)
            .unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,amount,category,date,description");
        assert_eq!(lines[1], "1,50,food,2024-01-15,\"lunch, with Sam\"");
        assert_eq!(lines[2], "2,120,travel,2024-01-16,train");
    }

    #[test]
    fn test_json_export() {
        let ledger = sample_ledger();
        let mut out = Vec::new();
        let count = Exporter::new(&ledger)
            .export(ExportFormat::Json, &mut out)
            .unwrap();

        assert_eq!(count, 2);
        let snapshot: SessionSnapshot = serde_json::from_slice(&out).unwrap();
        assert_eq!(snapshot.categories, vec!["food", "travel"]);
        assert_eq!(snapshot.expenses, ledger.list_all_expenses());
        assert_eq!(snapshot.expenses[1].date.to_string(), "2024-01-16");
    }

    #[test]
    fn test_empty_csv_has_header_only() {
        let ledger = ExpenseLedger::initialize(1, &["food"]).unwrap();
        let mut out = Vec::new();
        let count = Exporter::new(&ledger)
            .export_expenses_csv(&mut out)
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,amount,category,date,description\n"
        );
    }
}
