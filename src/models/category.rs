//! Preset categories
//!
//! Categories are free-form strings, but the entry forms offer a fixed list
//! per kind. Anything that does not fit goes to the その他 bucket.

use super::transaction::TransactionKind;

/// Catch-all category present in both lists
pub const OTHER_CATEGORY: &str = "その他";

/// Expense categories offered by the entry forms
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "食費",
    "交通費",
    "家賃",
    "娯楽",
    "日用品",
    "交際費",
    OTHER_CATEGORY,
];

/// Income categories offered by the entry forms
pub const INCOME_CATEGORIES: [&str; 5] = ["給与", "賞与", "副業", "臨時収入", OTHER_CATEGORY];

/// The preset list for a kind
pub fn preset_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
        TransactionKind::Income => &INCOME_CATEGORIES,
    }
}

/// Whether a (trimmed) category name is one of the presets for a kind
pub fn is_preset(kind: TransactionKind, category: &str) -> bool {
    preset_categories(kind).contains(&category.trim())
}
