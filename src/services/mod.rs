//! Service layer for Kakeibo
//!
//! The service layer sits on top of the storage layer: it caches monthly
//! summaries and keeps that cache consistent with ledger mutations.

pub mod aggregation;
pub mod household;

pub use aggregation::{compute_summary, AggregationCache, SummarySource};
pub use household::Household;
