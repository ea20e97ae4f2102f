//! Per-month summary cache
//!
//! Summaries are computed on first request and kept until the month they
//! cover is invalidated. Entries are only ever removed, never patched, so a
//! cached summary always equals a fresh computation.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{BalanceSummary, CategoryTotals, MonthlySummary, TransactionKind, Yen};
use crate::storage::Ledger;

/// Anything that can answer the monthly aggregate queries
pub trait SummarySource {
    fn category_summary(&self, year: i32, month: u32, kind: TransactionKind) -> CategoryTotals;
    fn income_total(&self, year: i32, month: u32) -> Yen;
    fn expense_total(&self, year: i32, month: u32) -> Yen;
}

impl SummarySource for Ledger {
    fn category_summary(&self, year: i32, month: u32, kind: TransactionKind) -> CategoryTotals {
        Ledger::category_summary(self, year, month, kind)
    }

    fn income_total(&self, year: i32, month: u32) -> Yen {
        Ledger::income_total(self, year, month)
    }

    fn expense_total(&self, year: i32, month: u32) -> Yen {
        Ledger::expense_total(self, year, month)
    }
}

/// Build a summary straight from a source, bypassing any cache
pub fn compute_summary<S: SummarySource + ?Sized>(source: &S, year: i32, month: u32) -> MonthlySummary {
    MonthlySummary {
        year,
        month,
        expense_by_category: source.category_summary(year, month, TransactionKind::Expense),
        income_by_category: source.category_summary(year, month, TransactionKind::Income),
        balance: BalanceSummary {
            income: source.income_total(year, month),
            expense: source.expense_total(year, month),
        },
    }
}

/// Memoized monthly summaries keyed by (year, month)
#[derive(Debug, Default)]
pub struct AggregationCache {
    entries: HashMap<(i32, u32), MonthlySummary>,
}

impl AggregationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for a month, computing it on a miss
    pub fn get<S: SummarySource + ?Sized>(&mut self, source: &S, year: i32, month: u32) -> MonthlySummary {
        if let Some(summary) = self.entries.get(&(year, month)) {
            tracing::debug!(year, month, "summary cache hit");
            return summary.clone();
        }

        tracing::debug!(year, month, "summary cache miss");
        let summary = compute_summary(source, year, month);
        self.entries.insert((year, month), summary.clone());
        summary
    }

    /// Drop the entry for the month containing `date`
    pub fn invalidate(&mut self, date: NaiveDate) {
        if self.entries.remove(&(date.year(), date.month())).is_some() {
            tracing::debug!(year = date.year(), month = date.month(), "summary invalidated");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.entries.contains_key(&(year, month))
    }
}
