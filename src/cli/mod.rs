//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod colors;
pub mod report;
pub mod todo;
pub mod transaction;

pub use colors::{handle_colors_command, ColorsCommands};
pub use report::{handle_chart_command, handle_summary_command};
pub use todo::{handle_todo_command, TodoCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
