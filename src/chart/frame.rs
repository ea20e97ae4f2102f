//! A single rendered state of a donut chart
//!
//! Frames are plain data: a renderer turns them into pixels or cells. The
//! geometry follows the usual pie layout, starting at 12 o'clock (90°) and
//! sweeping clockwise.

use serde::Serialize;

use crate::models::{HexColor, Yen};

use super::ChartKind;

/// Angle of the first wedge edge, measured counterclockwise from 3 o'clock
pub const START_ANGLE_DEG: f64 = 90.0;

/// How a segment is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fill {
    Color(HexColor),
    /// The not-yet-revealed remainder of an in-progress frame
    Transparent,
}

/// One slice of the donut
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Category label, empty for the transparent filler
    pub label: String,
    pub value: f64,
    pub fill: Fill,
}

impl Segment {
    pub fn is_filler(&self) -> bool {
        self.fill == Fill::Transparent
    }
}

/// Sign used for the center label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn color(&self) -> HexColor {
        match self {
            Self::Positive => HexColor::rgb(0x4c, 0xaf, 0x50),
            Self::Negative => HexColor::rgb(0xd6, 0x27, 0x28),
        }
    }
}

/// Text shown in the hole of the donut on the final frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CenterLabel {
    pub title: String,
    pub amount: String,
    pub tone: Tone,
}

impl CenterLabel {
    /// Label for a chart kind; `amount` is the kind's total (net for balance)
    pub fn for_kind(kind: ChartKind, amount: Yen) -> Self {
        match kind {
            ChartKind::Expense => Self {
                title: "支出合計".to_string(),
                amount: (-amount.abs()).format_signed(),
                tone: Tone::Negative,
            },
            ChartKind::Income => Self {
                title: "収入合計".to_string(),
                amount: amount.abs().format_signed(),
                tone: Tone::Positive,
            },
            ChartKind::Balance => Self {
                title: "収支".to_string(),
                amount: amount.format_signed(),
                tone: if amount.is_negative() {
                    Tone::Negative
                } else {
                    Tone::Positive
                },
            },
        }
    }
}

impl std::fmt::Display for CenterLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.title, self.amount)
    }
}

/// Label/color pair shown beside a settled category chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: HexColor,
    pub amount: Yen,
}

/// Angular extent of one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Clockwise distance of the leading edge from 12 o'clock, in degrees
    pub offset_deg: f64,
    pub sweep_deg: f64,
    pub fill: Fill,
}

impl Wedge {
    /// Leading edge as a counterclockwise angle from 3 o'clock
    pub fn start_angle_deg(&self) -> f64 {
        START_ANGLE_DEG - self.offset_deg
    }

    /// Trailing edge as a counterclockwise angle from 3 o'clock
    pub fn end_angle_deg(&self) -> f64 {
        START_ANGLE_DEG - self.offset_deg - self.sweep_deg
    }

    /// Whether a counterclockwise angle from 3 o'clock falls in this wedge
    pub fn contains(&self, angle_deg: f64) -> bool {
        let clockwise = (START_ANGLE_DEG - angle_deg).rem_euclid(360.0);
        clockwise >= self.offset_deg && clockwise < self.offset_deg + self.sweep_deg
    }
}

/// Everything needed to draw the chart at one point of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub kind: ChartKind,
    pub year: i32,
    pub month: u32,
    pub frame: u32,
    pub total_frames: u32,
    pub segments: Vec<Segment>,
    /// Present only on the final frame
    pub center: Option<CenterLabel>,
    /// Present only on the final frame of a category chart
    pub legend: Vec<LegendEntry>,
}

impl ChartFrame {
    pub fn is_final(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Wedges in drawing order, clockwise from 12 o'clock
    pub fn wedges(&self) -> Vec<Wedge> {
        let total: f64 = self.segments.iter().map(|s| s.value.max(0.0)).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut offset = 0.0;
        self.segments
            .iter()
            .map(|segment| {
                let sweep = segment.value.max(0.0) / total * 360.0;
                let wedge = Wedge {
                    offset_deg: offset,
                    sweep_deg: sweep,
                    fill: segment.fill,
                };
                offset += sweep;
                wedge
            })
            .collect()
    }

    /// Fill at a counterclockwise angle from 3 o'clock
    pub fn fill_at(&self, angle_deg: f64) -> Option<Fill> {
        self.wedges()
            .into_iter()
            .find(|wedge| wedge.contains(angle_deg))
            .map(|wedge| wedge.fill)
    }
}
