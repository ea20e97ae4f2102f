//! Kakeibo - terminal household ledger
//!
//! Records income and expense transactions and todo items, keeps them in
//! JSON files, and shows monthly summaries with animated category charts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, todos, amounts, and summaries
//! - `storage`: JSON-backed ledger and todo store
//! - `services`: Summary cache and the household session
//! - `chart`: Frame-driven donut chart animation
//! - `cli`, `display`: Command-line interface
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use kakeibo::config::KakeiboPaths;
//! use kakeibo::services::Household;
//!
//! let mut household = Household::open(KakeiboPaths::new()?)?;
//! let summary = household.monthly_summary(2024, 5);
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{KakeiboError, KakeiboResult};
