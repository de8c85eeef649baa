use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ExpenseLedger;
use crate::domain::{Amount, parse_amount};

const MENU: &str = "\nExpense Tracker Menu:
1. Add Expense
2. Undo Last Action
3. View All Categories
4. View All Expenses
5. Exit";

const FAREWELL: &str = "Exiting the Expense Tracker. Goodbye!";

/// The interactive menu loop. Reads one line per answer from `input` and
/// writes prompts and results to `output`.
///
/// Reaching the end of input anywhere is treated as choosing Exit.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for the categories and build a ledger from them.
    /// Returns `None` if input ran out first.
    pub fn setup_ledger(&mut self) -> Result<Option<ExpenseLedger>> {
        let Some(count) = self.prompt_positive("How many categories do you want to create? ")?
        else {
            self.say(FAREWELL)?;
            return Ok(None);
        };

        self.say("Enter category names:")?;
        let mut names = Vec::new();
        for i in 1..=count {
            match self.prompt(&format!("Category {}: ", i))? {
                Some(name) => names.push(name),
                None => {
                    self.say(FAREWELL)?;
                    return Ok(None);
                }
            }
        }

        let ledger = ExpenseLedger::initialize(count, &names)?;
        self.say("Categories created successfully!")?;
        Ok(Some(ledger))
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self, ledger: &mut ExpenseLedger) -> Result<()> {
        loop {
            self.say(MENU)?;
            let Some(choice) = self.prompt_number("Enter your choice: ")? else {
                break;
            };
            debug!(choice, "menu choice");

            let keep_going = match choice {
                1 => self.add_expense(ledger)?,
                2 => {
                    match ledger.undo_last_action() {
                        Ok(expense) => self.say(&format!("Last action undone: {}", expense))?,
                        Err(e) => self.say(&e.to_string())?,
                    }
                    true
                }
                3 => {
                    self.say(&format!("Available categories: {}", ledger.categories()))?;
                    true
                }
                4 => {
                    self.show_expenses(ledger)?;
                    true
                }
                5 => false,
                _ => {
                    self.say("Invalid choice. Please try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.say(FAREWELL)
    }

    /// Menu option 1. Returns false if input ran out mid-way.
    fn add_expense(&mut self, ledger: &mut ExpenseLedger) -> Result<bool> {
        let Some(amount) = self.prompt_number("Enter amount: ")? else {
            return Ok(false);
        };

        let category = loop {
            self.say(&format!("Available categories: {}", ledger.categories()))?;
            let Some(input) = self.prompt("Enter category: ")? else {
                return Ok(false);
            };
            match ledger.check_category(&input) {
                Ok(category) => break category,
                Err(e) => self.say(&e.to_string())?,
            }
        };

        let date = loop {
            let Some(input) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
                return Ok(false);
            };
            match ExpenseLedger::check_date(&input) {
                Ok(_) => break input,
                Err(e) => self.say(&e.to_string())?,
            }
        };

        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(false);
        };

        match ledger.add_expense(amount, &category, &date, &description) {
            Ok(_) => self.say("Expense added successfully.")?,
            Err(e) => self.say(&e.to_string())?,
        }
        Ok(true)
    }

    fn show_expenses(&mut self, ledger: &ExpenseLedger) -> Result<()> {
        let expenses = ledger.list_all_expenses();
        if expenses.is_empty() {
            return self.say("No expenses recorded yet.");
        }

        self.say("All recorded expenses:")?;
        for expense in expenses {
            self.say(&expense.to_string())?;
        }
        Ok(())
    }

    // ========================
    // Line I/O
    // ========================

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to output")
    }

    /// Print `text` without a newline and read one answer line, with the
    /// line terminator stripped. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text).context("Failed to write to output")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    /// Prompt until the answer is a whole number.
    fn prompt_number(&mut self, text: &str) -> Result<Option<Amount>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_amount(&answer) {
                Ok(n) => return Ok(Some(n)),
                Err(e) => {
                    debug!(error = %e, "rejected numeric input");
                    self.say("Please enter a whole number.")?;
                }
            }
        }
    }

    /// Prompt until the answer is a whole number greater than zero.
    fn prompt_positive(&mut self, text: &str) -> Result<Option<usize>> {
        loop {
            let Some(n) = self.prompt_number(text)? else {
                return Ok(None);
            };
            match usize::try_from(n) {
                Ok(n) if n > 0 => return Ok(Some(n)),
                _ => self.say("Please enter a number greater than zero.")?,
            }
        }
    }
}
