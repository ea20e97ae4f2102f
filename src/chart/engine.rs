//! Animated donut chart state machine
//!
//! Each call to [`ChartAnimationEngine::update_chart`] starts a new run with a
//! fresh session id. Frame 0 is rendered immediately; frames 1 through
//! `total_frames` arrive later as [`FrameTick`]s. A tick from an older session
//! is discarded, so a new update always supersedes one in flight.

use std::time::Duration;

use crate::models::{BalanceSummary, CategoryTotals, HexColor, MonthlySummary, Yen};

use super::easing::{ease_in_out, progress};
use super::frame::{CenterLabel, ChartFrame, Fill, LegendEntry, Segment};
use super::scheduler::{FrameScheduler, FrameTick};
use super::{ChartKind, ColorSource, DEFAULT_SEGMENT_COLOR};

/// Frames per run, excluding frame 0
pub const TOTAL_FRAMES: u32 = 30;

/// Length of a full run
pub const ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Delay between frames: the run length split evenly, whole milliseconds, at
/// least 1 ms
pub fn frame_interval(duration: Duration, total_frames: u32) -> Duration {
    let per_frame_ms = duration.as_secs_f64() * 1000.0 / f64::from(total_frames.max(1));
    Duration::from_millis((per_frame_ms.floor() as u64).max(1))
}

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Nothing requested yet
    Idle,
    /// Frame `frame` is the last one committed
    Animating { frame: u32 },
    /// The final frame is showing
    Settled,
    /// The requested month had nothing to draw
    NoData,
}

/// What happened when a tick was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a superseded run
    Stale,
    Rendered { frame: u32 },
    /// The final frame was rendered and the run is over
    Settled,
}

/// Data of the current run
#[derive(Debug, Clone)]
struct Run {
    year: i32,
    month: u32,
    segments: Vec<(String, Yen, HexColor)>,
    /// Total for category charts, income minus expense for balance
    headline: Yen,
}

/// Drives one chart from its current picture to a new summary
#[derive(Debug)]
pub struct ChartAnimationEngine {
    kind: ChartKind,
    total_frames: u32,
    interval: Duration,
    session: u64,
    state: AnimationState,
    run: Option<Run>,
    period: Option<(i32, u32)>,
    last_frame: Option<ChartFrame>,
    frames_rendered: u32,
}

impl ChartAnimationEngine {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            total_frames: TOTAL_FRAMES,
            interval: frame_interval(ANIMATION_DURATION, TOTAL_FRAMES),
            session: 0,
            state: AnimationState::Idle,
            run: None,
            period: None,
            last_frame: None,
            frames_rendered: 0,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Id of the current run; bumps on every update and cancel
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Month of the most recent update
    pub fn period(&self) -> Option<(i32, u32)> {
        self.period
    }

    /// Most recently committed frame, if the current run drew anything
    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.last_frame.as_ref()
    }

    /// Frames rendered since the last update
    pub fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Message shown instead of a chart for an empty month
    pub fn no_data_message(&self) -> Option<String> {
        match (self.state, self.period) {
            (AnimationState::NoData, Some((year, month))) => Some(format!(
                "{}年{}月の{}データはありません",
                year,
                month,
                self.kind.subject()
            )),
            _ => None,
        }
    }

    /// Start a run toward new data, superseding any run in flight
    ///
    /// Category charts read `categories`; the balance chart reads `balance`.
    pub fn update_chart<C, S>(
        &mut self,
        year: i32,
        month: u32,
        categories: &CategoryTotals,
        balance: &BalanceSummary,
        colors: &C,
        scheduler: &mut S,
    ) -> AnimationState
    where
        C: ColorSource + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.session += 1;
        self.period = Some((year, month));
        self.frames_rendered = 0;

        let run = match self.kind.category_kind() {
            Some(kind) => {
                let segments: Vec<(String, Yen, HexColor)> = categories
                    .iter()
                    .filter(|entry| entry.amount.is_positive())
                    .map(|entry| {
                        let color = colors
                            .category_color(kind, &entry.category)
                            .unwrap_or(DEFAULT_SEGMENT_COLOR);
                        (entry.category.clone(), entry.amount, color)
                    })
                    .collect();
                let total: Yen = segments.iter().map(|(_, amount, _)| *amount).sum();
                Run {
                    year,
                    month,
                    segments,
                    headline: total,
                }
            }
            None => {
                let mut segments = Vec::with_capacity(2);
                if balance.income.is_positive() {
                    segments.push(("収入".to_string(), balance.income, BALANCE_INCOME_COLOR));
                }
                if balance.expense.is_positive() {
                    segments.push(("支出".to_string(), balance.expense, BALANCE_EXPENSE_COLOR));
                }
                Run {
                    year,
                    month,
                    segments,
                    headline: balance.net(),
                }
            }
        };

        if run.segments.is_empty() {
            tracing::debug!(kind = %self.kind, year, month, "chart has no data");
            self.run = None;
            self.last_frame = None;
            self.state = AnimationState::NoData;
            return self.state;
        }

        tracing::debug!(
            kind = %self.kind,
            session = self.session,
            segments = run.segments.len(),
            "chart run started"
        );
        self.run = Some(run);
        self.commit_frame(0, scheduler);
        self.state
    }

    /// Convenience for feeding a whole monthly summary
    pub fn show_summary<C, S>(
        &mut self,
        summary: &MonthlySummary,
        colors: &C,
        scheduler: &mut S,
    ) -> AnimationState
    where
        C: ColorSource + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let categories = match self.kind {
            ChartKind::Income => &summary.income_by_category,
            _ => &summary.expense_by_category,
        };
        self.update_chart(
            summary.year,
            summary.month,
            categories,
            &summary.balance,
            colors,
            scheduler,
        )
    }

    /// Deliver a scheduled continuation
    pub fn on_tick<S>(&mut self, tick: FrameTick, scheduler: &mut S) -> TickOutcome
    where
        S: FrameScheduler + ?Sized,
    {
        if tick.session != self.session || !self.is_animating() {
            tracing::trace!(
                kind = %self.kind,
                tick_session = tick.session,
                current = self.session,
                "discarding stale frame"
            );
            return TickOutcome::Stale;
        }

        self.commit_frame(tick.frame, scheduler);
        match self.state {
            AnimationState::Settled => TickOutcome::Settled,
            _ => TickOutcome::Rendered { frame: tick.frame },
        }
    }

    /// Stop the run in flight, keeping whatever frame was last committed
    pub fn cancel(&mut self) {
        if self.is_animating() {
            self.session += 1;
            self.state = AnimationState::Idle;
            tracing::debug!(kind = %self.kind, "chart run cancelled");
        }
    }

    /// Switch what the chart shows; the next update starts from scratch
    ///
    /// Ticks already scheduled for the old kind become stale.
    pub fn set_kind(&mut self, kind: ChartKind) {
        if kind == self.kind {
            return;
        }
        self.session += 1;
        self.kind = kind;
        self.state = AnimationState::Idle;
        self.run = None;
        self.last_frame = None;
        self.frames_rendered = 0;
    }

    /// Render `frame`, then either schedule the next one or settle
    fn commit_frame<S>(&mut self, frame: u32, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        let Some(run) = &self.run else {
            return;
        };

        let frame = frame.min(self.total_frames);
        self.last_frame = Some(self.build_frame(run, frame));
        self.frames_rendered += 1;

        if frame >= self.total_frames {
            self.state = AnimationState::Settled;
            tracing::debug!(kind = %self.kind, session = self.session, "chart settled");
        } else {
            self.state = AnimationState::Animating { frame };
            scheduler.schedule(
                self.interval,
                FrameTick {
                    session: self.session,
                    frame: frame + 1,
                },
            );
        }
    }

    fn build_frame(&self, run: &Run, frame: u32) -> ChartFrame {
        let is_final = frame >= self.total_frames;
        let eased = if is_final {
            1.0
        } else {
            ease_in_out(progress(frame, self.total_frames))
        };
        let sum: f64 = run
            .segments
            .iter()
            .map(|(_, amount, _)| amount.units() as f64)
            .sum();

        let mut segments: Vec<Segment> = run
            .segments
            .iter()
            .map(|(label, amount, color)| Segment {
                label: label.clone(),
                value: amount.units() as f64 * eased,
                fill: Fill::Color(*color),
            })
            .collect();

        let (center, legend) = if is_final {
            let legend = match self.kind {
                ChartKind::Balance => Vec::new(),
                _ => run
                    .segments
                    .iter()
                    .map(|(label, amount, color)| LegendEntry {
                        label: label.clone(),
                        color: *color,
                        amount: *amount,
                    })
                    .collect(),
            };
            (Some(CenterLabel::for_kind(self.kind, run.headline)), legend)
        } else {
            segments.push(Segment {
                label: String::new(),
                value: sum * (1.0 - eased),
                fill: Fill::Transparent,
            });
            (None, Vec::new())
        };

        ChartFrame {
            kind: self.kind,
            year: run.year,
            month: run.month,
            frame,
            total_frames: self.total_frames,
            segments,
            center,
            legend,
        }
    }
}

/// Fixed colors of the balance chart
pub const BALANCE_INCOME_COLOR: HexColor = HexColor::rgb(0x4c, 0xaf, 0x50);
pub const BALANCE_EXPENSE_COLOR: HexColor = HexColor::rgb(0xd6, 0x27, 0x28);
