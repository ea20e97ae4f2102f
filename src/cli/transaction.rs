//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing, and deleting transactions.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use crate::display::{format_transaction_card, format_transaction_table};
use crate::error::KakeiboResult;
use crate::models::{parse_date, parse_year_month, TransactionKind, ValidationError, Yen};
use crate::services::Household;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount in whole yen (e.g. "1500" or "1,500")
        amount: String,
        /// Category (e.g. 食費, 給与)
        category: String,
        /// Record as income instead of expense
        #[arg(short, long)]
        income: bool,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only show this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transactions recorded on one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Delete every transaction recorded on one day
    DeleteDay {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse an optional `--date`, defaulting to today
pub fn date_or_today(date: Option<&str>) -> KakeiboResult<NaiveDate> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today()),
    }
}

/// Parse an optional `--month`, defaulting to the current month
pub fn month_or_current(month: Option<&str>) -> KakeiboResult<(i32, u32)> {
    match month {
        Some(s) => Ok(parse_year_month(s)?),
        None => {
            let now = today();
            Ok((now.year(), now.month()))
        }
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(
    household: &mut Household,
    cmd: TransactionCommands,
) -> KakeiboResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            income,
            date,
        } => {
            let amount = Yen::parse(&amount)
                .map_err(|_| ValidationError::InvalidAmount(amount.clone()))?;
            let date = date_or_today(date.as_deref())?;
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let txn = household.add_transaction(amount.units(), &category, date, kind)?;
            println!("Recorded {}: {}", txn.id(), format_transaction_card(&txn));
        }

        TransactionCommands::List { month, limit } => {
            let ledger = household.ledger();
            let transactions: Vec<_> = match month {
                Some(month) => {
                    let (year, month) = parse_year_month(&month)?;
                    ledger.transactions_for_month(year, month)
                }
                None => ledger.all_transactions().iter().collect(),
            };

            let shown: Vec<_> = transactions.iter().take(limit).copied().collect();
            print!("{}", format_transaction_table(&shown));
            if transactions.len() > shown.len() {
                println!(
                    "Showing {} of {} transactions (use --limit to see more)",
                    shown.len(),
                    transactions.len()
                );
            }
        }

        TransactionCommands::Day { date } => {
            let date = parse_date(&date)?;
            let transactions = household.ledger().transactions_for_day(date);
            print!("{}", format_transaction_table(&transactions));
        }

        TransactionCommands::DeleteDay { date, yes } => {
            let date = parse_date(&date)?;
            let matching = household.ledger().transactions_for_day(date);

            if matching.is_empty() {
                println!("No transactions on {}", date);
                return Ok(());
            }

            if !yes {
                println!("About to delete {} transaction(s) on {}:", matching.len(), date);
                print!("{}", format_transaction_table(&matching));
                println!();
                println!("Use --yes to confirm deletion");
                return Ok(());
            }

            let removed = household.delete_transactions_for_day(date)?;
            println!("Deleted {} transaction(s) on {}", removed, date);
        }
    }

    Ok(())
}
