//! Modal dialogs for data entry and confirmation

pub mod confirm;
pub mod todo;
pub mod transaction;
