//! Display formatting for terminal output
//!
//! Tables and text reports printed by the command-line interface.

pub mod report;
pub mod todo;
pub mod transaction;

pub use report::{format_chart, format_monthly_summary};
pub use todo::format_todo_table;
pub use transaction::{format_month_heading, format_transaction_card, format_transaction_table};
