//! Transaction display formatting

use chrono::Datelike;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id().short(),
            date: txn.date().format("%Y-%m-%d").to_string(),
            kind: txn.kind().label(),
            category: txn.category().to_string(),
            amount: txn.signed_amount().format_signed(),
        }
    }
}

/// Format transactions as a table
pub fn format_transaction_table(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions.iter().map(|txn| (*txn).into()).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// One-line card text, e.g. "5月25日  給与  +¥2,500"
pub fn format_transaction_card(txn: &Transaction) -> String {
    format!(
        "{}月{}日  {}  {}",
        txn.date().month(),
        txn.date().day(),
        txn.category(),
        txn.signed_amount().format_signed()
    )
}

/// Month heading used by grouped lists, e.g. "2024年5月"
pub fn format_month_heading(year: i32, month: u32) -> String {
    format!("{}年{}月", year, month)
}
