//! Transaction model
//!
//! A transaction is an immutable income or expense record. It is validated
//! when built and never edited afterwards; the ledger only ever adds them or
//! removes whole days of them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Yen;
use super::validation::ValidationError;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Both kinds, income first
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Identifier used in files and settings keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Label shown in the interface
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "収入",
            Self::Expense => "支出",
        }
    }

    /// The other kind
    pub fn toggled(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ValidationError::InvalidKind(s.to_string())),
        }
    }
}

/// On-disk shape of a transaction
///
/// Deserialization goes through this record so that a stored transaction is
/// held to the same rules as a freshly entered one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub amount: i64,
    pub category: String,
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
}

/// An income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    amount: Yen,
    category: String,
    date: NaiveDate,
    kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction with a fresh identifier
    pub fn new(
        amount: i64,
        category: impl AsRef<str>,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<Self, ValidationError> {
        Self::with_id(TransactionId::new(), amount, category, date, kind)
    }

    /// Rebuild a transaction with a known identifier
    pub fn with_id(
        id: TransactionId,
        amount: i64,
        category: impl AsRef<str>,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        if amount > Yen::MAX_ENTRY {
            return Err(ValidationError::AmountTooLarge(amount));
        }

        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(ValidationError::BlankCategory);
        }

        Ok(Self {
            id,
            amount: Yen::new(amount),
            category: category.to_string(),
            date,
            kind,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn amount(&self) -> Yen {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Whether the transaction falls in the given calendar month
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Amount with the sign implied by its kind, e.g. "-¥1,000"
    pub fn signed_amount(&self) -> Yen {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let kind: TransactionKind = record.kind.parse()?;
        Self::with_id(
            record.id,
            record.amount,
            record.category,
            record.transaction_date,
            kind,
        )
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            amount: txn.amount.units(),
            category: txn.category,
            transaction_date: txn.date,
            kind: txn.kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.signed_amount().format_signed()
        )
    }
}
