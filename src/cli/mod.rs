use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::ExpenseLedger;
use crate::domain::{CategorySet, format_expense_date};
use crate::io::{ExportFormat, Exporter};

mod shell;

pub use shell::Shell;

/// Tally - Personal Expense Tracker
#[derive(Parser, Debug, Default)]
#[command(name = "tally")]
#[command(about = "An in-memory expense tracker driven by a text menu")]
#[command(version)]
pub struct Cli {
    /// Predefine a category and skip the startup prompt (repeatable)
    #[arg(short = 'c', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Log filter directive (e.g. "debug", "tally=trace"); overrides --verbose
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print spending per category on exit
    #[arg(long)]
    pub summary: bool,

    /// Print spending per day on exit
    #[arg(long)]
    pub daily: bool,

    /// Verify the ledger's indices and undo history on exit
    #[arg(long)]
    pub check: bool,

    /// Write the session's expenses to stdout on exit
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub export: Option<ExportFormat>,
}

impl Cli {
    /// The tracing filter these flags ask for.
    pub fn log_filter(&self) -> String {
        match &self.log_level {
            Some(level) => level.clone(),
            None if self.verbose => "debug".to_string(),
            None => "warn".to_string(),
        }
    }

    /// Install the stderr log subscriber. Safe to call more than once.
    pub fn init_logging(&self) -> Result<()> {
        let filter = EnvFilter::try_new(self.log_filter())
            .with_context(|| format!("Invalid log level '{}'", self.log_filter()))?;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
        Ok(())
    }

    pub fn run(self) -> Result<()> {
        self.init_logging()?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_session(stdin.lock(), stdout.lock())
    }

    /// Run one whole session: category setup, the menu loop, then the
    /// optional exit reports.
    pub fn run_session<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<()> {
        let mut shell = Shell::new(input, output);

        let ledger = if self.categories.is_empty() {
            shell.setup_ledger()?
        } else {
            let categories: CategorySet = self.categories.iter().collect();
            Some(ExpenseLedger::new(categories))
        };

        let Some(mut ledger) = ledger else {
            return Ok(());
        };

        shell.run(&mut ledger)?;

        let mut output = shell.into_output();
        if self.summary {
            write_summary(&ledger, &mut output)?;
        }
        if self.daily {
            write_daily(&ledger, &mut output)?;
        }
        if self.check {
            write_check(&ledger, &mut output)?;
        }
        if let Some(format) = self.export {
            Exporter::new(&ledger).export(format, &mut output)?;
        }
        output.flush().context("Failed to flush output")?;
        Ok(())
    }
}

fn write_summary<W: Write>(ledger: &ExpenseLedger, out: &mut W) -> Result<()> {
    let report = ledger.category_spending();

    writeln!(out)?;
    writeln!(out, "Category Spending Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<20} {:>12} {:>8} {:>12} {:>8}",
        "CATEGORY", "TOTAL", "COUNT", "AVERAGE", "PERCENT"
    )?;
    writeln!(out, "{}", "-".repeat(65))?;

    for cat in &report.categories {
        writeln!(
            out,
            "{:<20} {:>12} {:>8} {:>12} {:>7.1}%",
            truncate(&cat.category, 20),
            cat.total,
            cat.count,
            cat.average,
            cat.percentage
        )?;
    }

    writeln!(out, "{}", "-".repeat(65))?;
    writeln!(out, "{:<20} {:>12} {:>8}", "TOTAL", report.total, report.count)?;
    Ok(())
}

fn write_daily<W: Write>(ledger: &ExpenseLedger, out: &mut W) -> Result<()> {
    let days = ledger.daily_spending();

    writeln!(out)?;
    writeln!(out, "Daily Spending Report")?;
    writeln!(out)?;
    if days.is_empty() {
        writeln!(out, "No expenses recorded yet.")?;
        return Ok(());
    }

    writeln!(out, "{:<12} {:>12} {:>8}", "DATE", "TOTAL", "COUNT")?;
    writeln!(out, "{}", "-".repeat(34))?;
    for day in &days {
        writeln!(
            out,
            "{:<12} {:>12} {:>8}",
            format_expense_date(day.date),
            day.total,
            day.count
        )?;
    }
    Ok(())
}

fn write_check<W: Write>(ledger: &ExpenseLedger, out: &mut W) -> Result<()> {
    let report = ledger.check_integrity();

    writeln!(out)?;
    writeln!(out, "Expenses:   {}", report.expense_count)?;
    writeln!(out, "Undoable:   {}", report.undo_depth)?;

    if report.is_healthy() {
        writeln!(out, "Ledger is consistent.")?;
        Ok(())
    } else {
        writeln!(out, "Issues found:")?;
        for issue in &report.issues {
            writeln!(out, "  - {}", issue)?;
        }
        out.flush()?;
        anyhow::bail!("Ledger integrity check failed");
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
