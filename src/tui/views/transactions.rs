//! Transaction list grouped by month, newest first

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::{format_month_heading, format_transaction_card};
use crate::storage::Ledger;
use crate::tui::app::App;
use crate::tui::theme::{amount_color, Palette};

/// A line of the grouped list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLine {
    Heading { year: i32, month: u32 },
    Card { text: String, is_income: bool, on_selected_day: bool },
}

/// Headings and cards for every month with transactions
pub fn grouped_lines(ledger: &Ledger, selected: chrono::NaiveDate) -> Vec<ListLine> {
    let mut lines = Vec::new();
    for (year, month) in ledger.months_with_transactions() {
        lines.push(ListLine::Heading { year, month });
        for txn in ledger.transactions_for_month(year, month) {
            lines.push(ListLine::Card {
                text: format_transaction_card(txn),
                is_income: txn.is_income(),
                on_selected_day: txn.date() == selected,
            });
        }
    }
    lines
}

/// Index of the selected month's heading, or of the first older month
fn anchor(lines: &[ListLine], year: i32, month: u32) -> usize {
    lines
        .iter()
        .position(|line| match line {
            ListLine::Heading { year: y, month: m } => (*y, *m) <= (year, month),
            ListLine::Card { .. } => false,
        })
        .unwrap_or(0)
}

fn to_line(line: &ListLine, palette: &Palette) -> Line<'static> {
    match line {
        ListLine::Heading { year, month } => Line::from(Span::styled(
            format_month_heading(*year, *month),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        ListLine::Card {
            text,
            is_income,
            on_selected_day,
        } => {
            let mut style = Style::default().fg(amount_color(*is_income));
            if *on_selected_day {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(format!("  {}", text), style))
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let ledger = app.household.ledger();
    let block = Block::default()
        .title(" 取引 ")
        .borders(Borders::ALL)
        .border_style(app.palette.border(false));

    if ledger.is_empty() {
        frame.render_widget(Paragraph::new("取引はまだありません").block(block), area);
        return;
    }

    let lines = grouped_lines(ledger, app.selected_date);
    let (year, month) = app.year_month();
    let start = (anchor(&lines, year, month) + app.scroll_offset).min(lines.len().saturating_sub(1));

    let text: Vec<Line> = lines[start..]
        .iter()
        .map(|line| to_line(line, &app.palette))
        .collect();
    frame.render_widget(Paragraph::new(text).block(block), area);
}
