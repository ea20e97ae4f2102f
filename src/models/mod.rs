//! Core data models for Kakeibo
//!
//! Transactions and todo items are the two persisted entities. Both validate
//! their input on construction.

pub mod category;
pub mod color;
pub mod ids;
pub mod money;
pub mod summary;
pub mod todo;
pub mod transaction;
pub mod validation;

pub use category::{preset_categories, EXPENSE_CATEGORIES, INCOME_CATEGORIES, OTHER_CATEGORY};
pub use color::HexColor;
pub use ids::{TodoId, TransactionId};
pub use money::Yen;
pub use summary::{BalanceSummary, CategoryTotal, CategoryTotals, DayTotals, MonthlySummary};
pub use todo::TodoItem;
pub use transaction::{Transaction, TransactionKind};
pub use validation::{parse_date, parse_year_month, ValidationError};
