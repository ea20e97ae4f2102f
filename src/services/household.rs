//! Household session
//!
//! Pairs the stores with the summary cache so every mutation also drops the
//! cached summary of the month it touched. Both the CLI and the TUI go
//! through this type rather than mutating the ledger directly.

use chrono::NaiveDate;

use crate::config::paths::KakeiboPaths;
use crate::config::Settings;
use crate::error::KakeiboResult;
use crate::models::{MonthlySummary, TodoId, TodoItem, Transaction, TransactionKind};
use crate::storage::{Ledger, Storage, TodoStore};

use super::aggregation::AggregationCache;

/// Open stores, settings, and the summary cache for one session
#[derive(Debug)]
pub struct Household {
    storage: Storage,
    settings: Settings,
    cache: AggregationCache,
}

impl Household {
    /// Open everything under a data directory
    pub fn open(paths: KakeiboPaths) -> KakeiboResult<Self> {
        let settings = Settings::load(&paths);
        let storage = Storage::open(paths)?;
        Ok(Self::new(storage, settings))
    }

    pub fn new(storage: Storage, settings: Settings) -> Self {
        Self {
            storage,
            settings,
            cache: AggregationCache::new(),
        }
    }

    pub fn paths(&self) -> &KakeiboPaths {
        self.storage.paths()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn ledger(&self) -> &Ledger {
        &self.storage.ledger
    }

    pub fn todos(&self) -> &TodoStore {
        &self.storage.todos
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn cache(&self) -> &AggregationCache {
        &self.cache
    }

    /// Validate, record, and persist a transaction
    ///
    /// On a write failure the transaction stays recorded in memory and the
    /// error is returned.
    pub fn add_transaction(
        &mut self,
        amount: i64,
        category: &str,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> KakeiboResult<Transaction> {
        let transaction = Transaction::new(amount, category, date, kind)?;

        let saved = self.storage.ledger.add(transaction.clone());
        self.cache.invalidate(date);
        saved?;

        Ok(transaction)
    }

    /// Remove every transaction on a day, returning how many went
    pub fn delete_transactions_for_day(&mut self, date: NaiveDate) -> KakeiboResult<usize> {
        let removed = self.storage.ledger.delete_transactions_for_day(date);
        self.cache.invalidate(date);
        removed
    }

    /// Cached summary for a month
    pub fn monthly_summary(&mut self, year: i32, month: u32) -> MonthlySummary {
        self.cache.get(&self.storage.ledger, year, month)
    }

    pub fn add_todo(&mut self, content: &str, due_date: NaiveDate) -> KakeiboResult<TodoItem> {
        self.storage.todos.add(content, due_date)
    }

    pub fn set_todo_completed(&mut self, id: &TodoId, completed: bool) -> KakeiboResult<bool> {
        self.storage.todos.set_completed(id, completed)
    }

    pub fn delete_todo(&mut self, id: &TodoId) -> KakeiboResult<bool> {
        self.storage.todos.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Yen;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn create_household() -> (TempDir, Household) {
        let temp_dir = TempDir::new().unwrap();
        let household =
            Household::open(KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, household)
    }

    #[test]
    fn test_add_reflected_in_cached_summary() {
        let (_temp_dir, mut household) = create_household();
        household
            .add_transaction(1000, "食費", date(5, 1), TransactionKind::Expense)
            .unwrap();
        let before = household.monthly_summary(2024, 5);
        assert!(household.cache().contains(2024, 5));

        household
            .add_transaction(500, "食費", date(5, 2), TransactionKind::Expense)
            .unwrap();
        assert!(!household.cache().contains(2024, 5));

        let after = household.monthly_summary(2024, 5);
        assert_eq!(before.expense_by_category.get("食費"), Some(Yen::new(1000)));
        assert_eq!(after.expense_by_category.get("食費"), Some(Yen::new(1500)));
        assert_eq!(after.balance.expense, Yen::new(1500));
    }

    #[test]
    fn test_delete_day_reflected_in_cached_summary() {
        let (_temp_dir, mut household) = create_household();
        household
            .add_transaction(2500, "給与", date(5, 25), TransactionKind::Income)
            .unwrap();
        household
            .add_transaction(800, "娯楽", date(6, 1), TransactionKind::Expense)
            .unwrap();
        household.monthly_summary(2024, 5);
        household.monthly_summary(2024, 6);

        assert_eq!(household.delete_transactions_for_day(date(5, 25)).unwrap(), 1);

        assert!(household.cache().contains(2024, 6));
        assert!(household.monthly_summary(2024, 5).is_empty());
    }

    #[test]
    fn test_write_failure_keeps_change_and_invalidates() {
        let (temp_dir, mut household) = create_household();
        household.monthly_summary(2024, 5);

        // A non-empty directory in place of the ledger file makes every save fail
        let ledger_path = temp_dir.path().join("transactions.json");
        std::fs::create_dir(&ledger_path).unwrap();
        std::fs::write(ledger_path.join("keep"), "x").unwrap();

        let err = household
            .add_transaction(1000, "食費", date(5, 1), TransactionKind::Expense)
            .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(household.ledger().len(), 1);
        assert!(!household.cache().contains(2024, 5));
        assert_eq!(
            household.monthly_summary(2024, 5).expense_by_category.get("食費"),
            Some(Yen::new(1000))
        );

        let err = household.delete_transactions_for_day(date(5, 1)).unwrap_err();
        assert!(err.is_storage());
        assert!(household.ledger().is_empty());
        assert!(household.monthly_summary(2024, 5).is_empty());
    }

    #[test]
    fn test_invalid_transaction_leaves_cache_alone() {
        let (_temp_dir, mut household) = create_household();
        household.monthly_summary(2024, 5);

        let err = household
            .add_transaction(0, "食費", date(5, 1), TransactionKind::Expense)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(household.cache().contains(2024, 5));
        assert!(household.ledger().is_empty());
    }

    #[test]
    fn test_todo_round_trip() {
        let (temp_dir, mut household) = create_household();
        let todo = household.add_todo("買い物", date(5, 3)).unwrap();
        assert!(household.set_todo_completed(todo.id(), true).unwrap());

        let reopened =
            Household::open(KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert!(reopened.todos().get(todo.id()).unwrap().is_completed());
    }
}
