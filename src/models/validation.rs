//! Construction-time validation errors
//!
//! Every ledger entity validates its input when it is built. A rejected input
//! is reported synchronously and never retried.

use chrono::NaiveDate;
use std::fmt;

use super::money::{group_thousands, Yen};

/// Reasons an entity refused to be constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount was zero or negative
    NonPositiveAmount(i64),
    /// Amount was above the per-entry ceiling
    AmountTooLarge(i64),
    /// Category was empty after trimming
    BlankCategory,
    /// Todo content was empty after trimming
    BlankContent,
    /// Date string was not a real calendar date
    InvalidDate(String),
    /// Kind was neither "income" nor "expense"
    InvalidKind(String),
    /// Color was not a `#rrggbb` hex string
    InvalidColor(String),
    /// Amount text could not be read as a whole number
    InvalidAmount(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(got) => {
                write!(f, "amount must be a positive integer (got {})", got)
            }
            Self::AmountTooLarge(got) => write!(
                f,
                "amount must be at most {} (got {})",
                group_thousands(Yen::MAX_ENTRY.unsigned_abs()),
                got
            ),
            Self::BlankCategory => write!(f, "category cannot be empty"),
            Self::BlankContent => write!(f, "content cannot be empty"),
            Self::InvalidDate(s) => write!(f, "not a valid date (expected YYYY-MM-DD): {}", s),
            Self::InvalidKind(s) => {
                write!(f, "kind must be 'income' or 'expense' (got '{}')", s)
            }
            Self::InvalidColor(s) => write!(f, "color must look like #rrggbb (got '{}')", s),
            Self::InvalidAmount(s) => write!(f, "amount must be a whole number (got '{}')", s),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parse a `YYYY-MM` month into (year, month)
pub fn parse_year_month(s: &str) -> Result<(i32, u32), ValidationError> {
    let first = parse_date(&format!("{}-01", s.trim()))
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))?;
    Ok((chrono::Datelike::year(&first), chrono::Datelike::month(&first)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(matches!(
            parse_date("2024-02-30"),
            Err(ValidationError::InvalidDate(_))
        ));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2024-05").unwrap(), (2024, 5));
        assert!(parse_year_month("2024-13").is_err());
        assert!(parse_year_month("May").is_err());
    }
}
