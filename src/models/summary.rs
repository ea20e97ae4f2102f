//! Aggregated views over the ledger

use serde::Serialize;

use super::money::Yen;

/// Total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Yen,
}

/// Per-category totals, largest first
///
/// Ties keep the order in which the categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Build from (category, amount) pairs in first-seen order
    ///
    /// Sorting is stable, which is what gives ties their first-seen order.
    pub fn from_first_seen(entries: Vec<CategoryTotal>) -> Self {
        let mut entries = entries;
        entries.sort_by(|a, b| b.amount.cmp(&a.amount));
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Amount for a category, if present
    pub fn get(&self, category: &str) -> Option<Yen> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    /// Sum of all categories
    pub fn total(&self) -> Yen {
        self.entries.iter().map(|entry| entry.amount).sum()
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Income and expense totals for a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub income: Yen,
    pub expense: Yen,
}

impl BalanceSummary {
    /// Income minus expense
    pub fn net(&self) -> Yen {
        self.income - self.expense
    }
}

/// Everything the dashboard needs for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub expense_by_category: CategoryTotals,
    pub income_by_category: CategoryTotals,
    pub balance: BalanceSummary,
}

impl MonthlySummary {
    /// Whether the month has no transactions of either kind
    pub fn is_empty(&self) -> bool {
        self.expense_by_category.is_empty() && self.income_by_category.is_empty()
    }
}

/// Income and expense recorded on a single day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub income: Yen,
    pub expense: Yen,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(category: &str, amount: i64) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            amount: Yen::new(amount),
        }
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let totals = CategoryTotals::from_first_seen(vec![
            total("娯楽", 500),
            total("食費", 1500),
            total("交通費", 500),
        ]);

        let order: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["食費", "娯楽", "交通費"]);
        assert_eq!(totals.total(), Yen::new(2500));
        assert_eq!(totals.get("交通費"), Some(Yen::new(500)));
        assert_eq!(totals.get("家賃"), None);
    }

    #[test]
    fn test_balance_net() {
        let balance = BalanceSummary {
            income: Yen::new(1000),
            expense: Yen::new(1500),
        };
        assert_eq!(balance.net(), Yen::new(-500));
    }
}
