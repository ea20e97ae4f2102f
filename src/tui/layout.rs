//! Layout definitions for the TUI
//!
//! Tab bar on top, the active view in the middle, status bar at the bottom.
//! The dashboard splits further into summary, calendar, transactions, and
//! chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the whole screen
pub struct AppLayout {
    pub tabs: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the dashboard view
pub struct DashboardLayout {
    /// Month heading with income, expense, and balance
    pub summary: Rect,
    pub calendar: Rect,
    pub transactions: Rect,
    pub chart: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Summary
                Constraint::Min(10),   // Body
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(vertical[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(21), // Calendar: header + 6 weeks of 3 lines
                Constraint::Min(3),     // Transactions
            ])
            .split(columns[0]);

        Self {
            summary: vertical[0],
            calendar: left[0],
            transactions: left[1],
            chart: columns[1],
        }
    }
}

/// Chart panel: kind selector, donut, legend
pub struct ChartLayout {
    pub selector: Rect,
    pub donut: Rect,
    pub legend: Rect,
}

impl ChartLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(8),
            ])
            .split(area);

        Self {
            selector: chunks[0],
            donut: chunks[1],
            legend: chunks[2],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
