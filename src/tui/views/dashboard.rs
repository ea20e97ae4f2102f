//! Dashboard view
//!
//! Month heading with income, expense, and balance on top; calendar and
//! transaction list on the left; the animated chart on the right.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::format_month_heading;
use crate::models::BalanceSummary;
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;
use crate::tui::theme::amount_color;

use super::{calendar, chart, transactions};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = DashboardLayout::new(area);
    let summary = app.summary();

    render_summary(frame, app, &summary.balance, layout.summary);
    calendar::render(frame, app, layout.calendar);
    transactions::render(frame, app, layout.transactions);
    chart::render(frame, app, layout.chart);
}

fn render_summary(frame: &mut Frame, app: &App, balance: &BalanceSummary, area: Rect) {
    let (year, month) = app.year_month();
    let net = balance.net();

    let line = Line::from(vec![
        Span::styled(
            format_month_heading(year, month),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   収入 "),
        Span::styled(balance.income.to_string(), Style::default().fg(amount_color(true))),
        Span::raw("   支出 "),
        Span::styled(balance.expense.to_string(), Style::default().fg(amount_color(false))),
        Span::raw("   収支 "),
        Span::styled(
            net.format_signed(),
            Style::default()
                .fg(amount_color(!net.is_negative()))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.border(true));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
