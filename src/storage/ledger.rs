//! Transaction ledger backed by transactions.json
//!
//! The ledger keeps its transactions sorted by date, newest first, and writes
//! the whole collection back to disk after every mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::KakeiboResult;
use crate::models::{
    CategoryTotal, CategoryTotals, DayTotals, Transaction, TransactionKind, Yen,
};

use super::file_io::{read_json_or_default, write_json_atomic, LoadIssue};

/// Owns every recorded transaction
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    transactions: Vec<Transaction>,
    load_issue: Option<LoadIssue>,
}

impl Ledger {
    /// Load the ledger from disk
    ///
    /// A missing or malformed file gives an empty ledger. The reason is kept
    /// in [`Ledger::load_issue`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = read_json_or_default::<Vec<Transaction>, _>(&path);

        let mut ledger = Self {
            path,
            transactions: loaded.value,
            load_issue: loaded.issue.filter(LoadIssue::discarded_data),
        };
        ledger.sort();

        tracing::debug!(
            count = ledger.transactions.len(),
            path = %ledger.path.display(),
            "ledger loaded"
        );
        ledger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Why stored transactions were discarded on load, if they were
    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    /// Record a transaction and persist
    ///
    /// The transaction stays in memory even if the write fails.
    pub fn add(&mut self, transaction: Transaction) -> KakeiboResult<()> {
        tracing::info!(
            id = %transaction.id(),
            date = %transaction.date(),
            kind = %transaction.kind(),
            "adding transaction"
        );
        self.transactions.push(transaction);
        self.sort();
        self.save()
    }

    /// All transactions, newest date first
    pub fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions recorded on exactly `date`
    pub fn transactions_for_day(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.date() == date)
            .collect()
    }

    /// Transactions in a calendar month, newest first
    pub fn transactions_for_month(&self, year: i32, month: u32) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.in_month(year, month))
            .collect()
    }

    /// Remove every transaction on `date`, returning how many went
    ///
    /// Nothing is written when no transaction matched.
    pub fn delete_transactions_for_day(&mut self, date: NaiveDate) -> KakeiboResult<usize> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.date() != date);
        let removed = before - self.transactions.len();

        if removed > 0 {
            tracing::info!(%date, removed, "deleted transactions for day");
            self.save()?;
        }
        Ok(removed)
    }

    /// Sum of income in a month
    pub fn income_total(&self, year: i32, month: u32) -> Yen {
        self.kind_total(year, month, TransactionKind::Income)
    }

    /// Sum of expenses in a month
    pub fn expense_total(&self, year: i32, month: u32) -> Yen {
        self.kind_total(year, month, TransactionKind::Expense)
    }

    fn kind_total(&self, year: i32, month: u32, kind: TransactionKind) -> Yen {
        self.transactions
            .iter()
            .filter(|txn| txn.kind() == kind && txn.in_month(year, month))
            .map(|txn| txn.amount())
            .sum()
    }

    /// Per-category totals of one kind in a month, largest first
    pub fn category_summary(&self, year: i32, month: u32, kind: TransactionKind) -> CategoryTotals {
        let mut first_seen: Vec<CategoryTotal> = Vec::new();

        for txn in self
            .transactions
            .iter()
            .filter(|txn| txn.kind() == kind && txn.in_month(year, month))
        {
            match first_seen
                .iter_mut()
                .find(|entry| entry.category == txn.category())
            {
                Some(entry) => entry.amount += txn.amount(),
                None => first_seen.push(CategoryTotal {
                    category: txn.category().to_string(),
                    amount: txn.amount(),
                }),
            }
        }

        CategoryTotals::from_first_seen(first_seen)
    }

    /// Distinct (year, month) pairs that have transactions, newest first
    pub fn months_with_transactions(&self) -> Vec<(i32, u32)> {
        let mut months: Vec<(i32, u32)> = Vec::new();
        for txn in &self.transactions {
            let key = (txn.date().year(), txn.date().month());
            if months.last() != Some(&key) {
                months.push(key);
            }
        }
        months
    }

    /// Income and expense per day of a month
    pub fn day_totals(&self, year: i32, month: u32) -> BTreeMap<NaiveDate, DayTotals> {
        let mut totals: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
        for txn in self.transactions_for_month(year, month) {
            let day = totals.entry(txn.date()).or_default();
            match txn.kind() {
                TransactionKind::Income => day.income += txn.amount(),
                TransactionKind::Expense => day.expense += txn.amount(),
            }
        }
        totals
    }

    fn sort(&mut self) {
        // Stable, so equal dates keep insertion order
        self.transactions.sort_by(|a, b| b.date().cmp(&a.date()));
    }

    fn save(&self) -> KakeiboResult<()> {
        write_json_atomic(&self.path, &self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: i64, category: &str, on: NaiveDate) -> Transaction {
        Transaction::new(amount, category, on, TransactionKind::Expense).unwrap()
    }

    fn income(amount: i64, category: &str, on: NaiveDate) -> Transaction {
        Transaction::new(amount, category, on, TransactionKind::Income).unwrap()
    }

    fn create_test_ledger() -> (TempDir, Ledger) {
        let temp_dir = TempDir::new().unwrap();
        let ledger = Ledger::load(temp_dir.path().join("transactions.json"));
        (temp_dir, ledger)
    }

    #[test]
    fn test_empty_when_file_missing() {
        let (_temp_dir, ledger) = create_test_ledger();
        assert!(ledger.is_empty());
        assert!(ledger.load_issue().is_none());
        assert!(ledger.category_summary(2024, 5, TransactionKind::Expense).is_empty());
    }

    #[test]
    fn test_date_descending_after_any_insertion_order() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        for day in [3, 1, 4, 1, 5, 9, 2, 6] {
            ledger.add(expense(100, "食費", date(2024, 5, day))).unwrap();
        }

        let dates: Vec<NaiveDate> = ledger.all_transactions().iter().map(|t| t.date()).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        let first = expense(100, "食費", date(2024, 5, 1));
        let second = expense(200, "娯楽", date(2024, 5, 1));
        let (first_id, second_id) = (first.id().clone(), second.id().clone());

        ledger.add(first).unwrap();
        ledger.add(expense(300, "家賃", date(2024, 5, 2))).unwrap();
        ledger.add(second).unwrap();

        let same_day = ledger.transactions_for_day(date(2024, 5, 1));
        assert_eq!(same_day[0].id(), &first_id);
        assert_eq!(same_day[1].id(), &second_id);
    }

    #[test]
    fn test_category_summary_of_same_category() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(1000, "食費", date(2024, 5, 1))).unwrap();
        ledger.add(expense(500, "食費", date(2024, 5, 2))).unwrap();

        let summary = ledger.category_summary(2024, 5, TransactionKind::Expense);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get("食費"), Some(Yen::new(1500)));
        assert_eq!(ledger.expense_total(2024, 5), Yen::new(1500));
    }

    #[test]
    fn test_category_summary_sums_to_total() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(1200, "食費", date(2024, 5, 3))).unwrap();
        ledger.add(expense(80000, "家賃", date(2024, 5, 25))).unwrap();
        ledger.add(expense(640, "交通費", date(2024, 5, 9))).unwrap();
        ledger.add(expense(999, "食費", date(2024, 6, 1))).unwrap();
        ledger.add(income(250000, "給与", date(2024, 5, 25))).unwrap();

        let summary = ledger.category_summary(2024, 5, TransactionKind::Expense);
        assert_eq!(summary.total(), ledger.expense_total(2024, 5));
        assert_eq!(summary.iter().next().unwrap().category, "家賃");
        assert_eq!(ledger.income_total(2024, 5), Yen::new(250000));
    }

    #[test]
    fn test_category_ties_use_first_seen_in_date_descending_order() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(500, "娯楽", date(2024, 5, 1))).unwrap();
        ledger.add(expense(500, "交通費", date(2024, 5, 20))).unwrap();

        // 交通費 is newer, so it is seen first
        let order: Vec<String> = ledger
            .category_summary(2024, 5, TransactionKind::Expense)
            .iter()
            .map(|t| t.category.clone())
            .collect();
        assert_eq!(order, vec!["交通費", "娯楽"]);
    }

    #[test]
    fn test_delete_transactions_for_day() {
        let (temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(100, "食費", date(2024, 5, 1))).unwrap();
        ledger.add(expense(200, "食費", date(2024, 5, 1))).unwrap();
        ledger.add(expense(300, "食費", date(2024, 5, 2))).unwrap();

        assert_eq!(ledger.delete_transactions_for_day(date(2024, 5, 1)).unwrap(), 2);
        assert_eq!(ledger.len(), 1);

        let reloaded = Ledger::load(temp_dir.path().join("transactions.json"));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_delete_with_no_match_does_not_write() {
        let (temp_dir, mut ledger) = create_test_ledger();
        assert_eq!(ledger.delete_transactions_for_day(date(2024, 5, 1)).unwrap(), 0);
        assert!(!temp_dir.path().join("transactions.json").exists());
    }

    #[test]
    fn test_persisted_shape_and_reload() {
        let (temp_dir, mut ledger) = create_test_ledger();
        let txn = income(2500, "給与", date(2024, 5, 25));
        ledger.add(txn.clone()).unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("transactions.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["type"], "income");
        assert_eq!(json[0]["transaction_date"], "2024-05-25");
        assert!(raw.contains("給与"));

        let reloaded = Ledger::load(temp_dir.path().join("transactions.json"));
        assert_eq!(reloaded.all_transactions(), &[txn]);
    }

    #[test]
    fn test_malformed_file_loads_empty_with_issue() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        fs::write(&path, r#"[{"id": "nope"}]"#).unwrap();

        let ledger = Ledger::load(&path);
        assert!(ledger.is_empty());
        assert!(matches!(ledger.load_issue(), Some(LoadIssue::Malformed { .. })));
    }

    #[test]
    fn test_foreign_ids_load_and_survive_add() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        fs::write(
            &path,
            r#"[{"id": "tx-1", "amount": 1000, "category": "食費",
                 "transaction_date": "2024-05-01", "type": "expense"}]"#,
        )
        .unwrap();

        let mut ledger = Ledger::load(&path);
        assert!(ledger.load_issue().is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.all_transactions()[0].id().as_str(), "tx-1");

        ledger.add(expense(500, "交通費", date(2024, 5, 2))).unwrap();

        let reloaded = Ledger::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded
            .all_transactions()
            .iter()
            .any(|txn| txn.id().as_str() == "tx-1" && txn.amount() == Yen::new(1000)));
    }

    #[test]
    fn test_totals_at_amount_ceiling() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(Yen::MAX_ENTRY, "家賃", date(2024, 5, 1))).unwrap();
        ledger.add(expense(Yen::MAX_ENTRY, "家賃", date(2024, 5, 1))).unwrap();
        ledger.add(expense(1, "食費", date(2024, 5, 1))).unwrap();

        assert_eq!(ledger.expense_total(2024, 5), Yen::new(2 * Yen::MAX_ENTRY + 1));
        let summary = ledger.category_summary(2024, 5, TransactionKind::Expense);
        assert_eq!(summary.get("家賃"), Some(Yen::new(2 * Yen::MAX_ENTRY)));
        assert_eq!(summary.total(), ledger.expense_total(2024, 5));
    }

    #[test]
    fn test_months_and_day_totals() {
        let (_temp_dir, mut ledger) = create_test_ledger();
        ledger.add(expense(100, "食費", date(2024, 4, 30))).unwrap();
        ledger.add(expense(200, "食費", date(2024, 5, 2))).unwrap();
        ledger.add(income(900, "副業", date(2024, 5, 2))).unwrap();
        ledger.add(expense(50, "日用品", date(2024, 5, 31))).unwrap();

        assert_eq!(ledger.months_with_transactions(), vec![(2024, 5), (2024, 4)]);

        let days = ledger.day_totals(2024, 5);
        assert_eq!(days.len(), 2);
        assert_eq!(
            days[&date(2024, 5, 2)],
            DayTotals {
                income: Yen::new(900),
                expense: Yen::new(200),
            }
        );
    }
}
