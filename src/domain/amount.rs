use std::fmt;

/// Expense amounts are whole units of whatever currency the user thinks in.
/// No subdivision, no currency code.
pub type Amount = i64;

/// Sums of amounts. Wide enough that adding up any number of `Amount`s
/// cannot overflow.
pub type Total = i128;

pub fn sum_amounts<I: IntoIterator<Item = Amount>>(amounts: I) -> Total {
    amounts.into_iter().map(Total::from).sum()
}

/// Parse a whole-number amount typed at a prompt.
/// Example: "50" -> 50, " -12 " -> -12, "+7" -> 7
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    input
        .parse::<Amount>()
        .map_err(|_| ParseAmountError::NotAWholeNumber(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    NotAWholeNumber(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "no amount given"),
            ParseAmountError::NotAWholeNumber(s) => write!(f, "'{}' is not a whole number", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}
