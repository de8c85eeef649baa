use std::fmt;

use chrono::NaiveDate;

/// The only accepted date shape.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an expense date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts single-digit months and days and signed or
/// wide years, so the shape is checked byte by byte first. The calendar
/// check is chrono's proleptic Gregorian one, which rejects overflow days
/// ("2024-02-30") and out-of-range months ("2024-13-01").
pub fn parse_expense_date(input: &str) -> Result<NaiveDate, ParseDateError> {
    let bytes = input.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        return Err(ParseDateError::Malformed(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ParseDateError::NoSuchDate(input.to_string()))
}

/// Render a date the way it was typed.
pub fn format_expense_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDateError {
    /// Not of the form YYYY-MM-DD
    Malformed(String),
    /// Right shape, but not a day on the calendar
    NoSuchDate(String),
}

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDateError::Malformed(s) => write!(f, "'{}' is not in YYYY-MM-DD form", s),
            ParseDateError::NoSuchDate(s) => write!(f, "'{}' is not a calendar date", s),
        }
    }
}

impl std::error::Error for ParseDateError {}
