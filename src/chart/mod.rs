//! Animated category-breakdown charts
//!
//! The engine turns a monthly summary into a sequence of [`ChartFrame`]s. It
//! owns no timer: continuations go through a [`FrameScheduler`] supplied by
//! the caller, which keeps the engine usable from both the TUI event loop
//! and plain command-line code.

pub mod easing;
pub mod engine;
pub mod frame;
pub mod scheduler;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Settings;
use crate::error::KakeiboError;
use crate::models::{HexColor, TransactionKind};

pub use engine::{AnimationState, ChartAnimationEngine, TickOutcome, TOTAL_FRAMES};
pub use frame::{CenterLabel, ChartFrame, Fill, LegendEntry, Segment, Tone, Wedge};
pub use scheduler::{FrameScheduler, FrameTick, StepScheduler, TimerQueue};

/// Color for labels with no palette entry
pub const DEFAULT_SEGMENT_COLOR: HexColor = HexColor::rgb(0xcc, 0xcc, 0xcc);

/// Which breakdown a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Expense,
    Income,
    Balance,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Expense, ChartKind::Income, ChartKind::Balance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Balance => "balance",
        }
    }

    /// Tab title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "支出",
            Self::Income => "収入",
            Self::Balance => "収支",
        }
    }

    /// Noun used in the empty-month message
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Expense => "支出",
            Self::Income => "収入",
            Self::Balance => "取引",
        }
    }

    /// Transaction kind broken down by category, `None` for balance
    pub fn category_kind(&self) -> Option<TransactionKind> {
        match self {
            Self::Expense => Some(TransactionKind::Expense),
            Self::Income => Some(TransactionKind::Income),
            Self::Balance => None,
        }
    }

    /// Next kind in tab order
    pub fn next(&self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Balance,
            Self::Balance => Self::Expense,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Expense => Self::Balance,
            Self::Income => Self::Expense,
            Self::Balance => Self::Income,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = KakeiboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "balance" => Ok(Self::Balance),
            other => Err(KakeiboError::Config(format!(
                "Unknown chart kind '{}' (expected expense, income or balance)",
                other
            ))),
        }
    }
}

/// Supplies segment colors for category charts
pub trait ColorSource {
    fn category_color(&self, kind: TransactionKind, label: &str) -> Option<HexColor>;
}

impl ColorSource for Settings {
    fn category_color(&self, kind: TransactionKind, label: &str) -> Option<HexColor> {
        self.color_for(kind, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cycle() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.next().previous(), kind);
        }
        assert_eq!(ChartKind::Balance.next(), ChartKind::Expense);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Income".parse::<ChartKind>().unwrap(), ChartKind::Income);
        assert!("pie".parse::<ChartKind>().is_err());
    }
}
