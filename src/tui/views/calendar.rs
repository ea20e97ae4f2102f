//! Month calendar with per-day totals and open-todo markers

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::format_month_heading;
use crate::models::{money::group_thousands, Yen};
use crate::tui::app::App;
use crate::tui::theme::amount_color;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Weeks of a month, Sunday first; days outside the month are `None`
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = first.weekday().num_days_from_sunday() as usize;
    let mut day = first;
    while day.month() == month {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

/// Short amount for a calendar cell: "1,500", "12.5万"
pub fn compact_amount(amount: Yen) -> String {
    let units = amount.units().unsigned_abs();
    if units >= 100_000 {
        format!("{:.0}万", units as f64 / 10_000.0)
    } else if units >= 10_000 {
        format!("{:.1}万", units as f64 / 10_000.0)
    } else {
        group_thousands(units)
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (year, month) = app.year_month();
    let totals = app.household.ledger().day_totals(year, month);
    let todos = app.household.todos();

    let cell_width = ((area.width.saturating_sub(2)) / 7).max(4) as usize;
    let pad = |text: String, width: usize| {
        let used = Line::from(text.as_str()).width();
        format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
    };

    let mut lines = vec![Line::from(
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let color = match i {
                    0 => Color::Red,
                    6 => Color::Blue,
                    _ => Color::Gray,
                };
                Span::styled(pad(name.to_string(), cell_width), Style::default().fg(color))
            })
            .collect::<Vec<_>>(),
    )];

    for week in month_grid(year, month) {
        let mut day_spans = Vec::with_capacity(7);
        let mut income_spans = Vec::with_capacity(7);
        let mut expense_spans = Vec::with_capacity(7);

        for cell in week {
            let Some(date) = cell else {
                for spans in [&mut day_spans, &mut income_spans, &mut expense_spans] {
                    spans.push(Span::raw(" ".repeat(cell_width)));
                }
                continue;
            };

            let open = todos.uncompleted_count_for_day(date);
            let label = if open > 0 {
                format!("{}●{}", date.day(), open)
            } else {
                date.day().to_string()
            };
            let mut style = Style::default();
            if date == app.today {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if date == app.selected_date {
                style = app.palette.selected();
            }
            day_spans.push(Span::styled(pad(label, cell_width), style));

            let day = totals.get(&date).copied().unwrap_or_default();
            let income = if day.income.is_positive() {
                format!("+{}", compact_amount(day.income))
            } else {
                String::new()
            };
            let expense = if day.expense.is_positive() {
                format!("-{}", compact_amount(day.expense))
            } else {
                String::new()
            };
            income_spans.push(Span::styled(
                pad(income, cell_width),
                Style::default().fg(amount_color(true)),
            ));
            expense_spans.push(Span::styled(
                pad(expense, cell_width),
                Style::default().fg(amount_color(false)),
            ));
        }

        lines.push(Line::from(day_spans));
        lines.push(Line::from(income_spans));
        lines.push(Line::from(expense_spans));
    }

    let block = Block::default()
        .title(format!(" {} ", format_month_heading(year, month)))
        .borders(Borders::ALL)
        .border_style(app.palette.border(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
