//! Settings view: theme choice and category colors
//!
//! Colors are picked from the fixed palette; Enter on a category moves it to
//! the next swatch no other category of the same kind uses.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::config::palette::all_swatches;
use crate::models::HexColor;
use crate::tui::app::{App, SettingsRow};
use crate::tui::theme::to_color;

fn swatch_name(color: HexColor) -> &'static str {
    all_swatches()
        .into_iter()
        .find(|swatch| swatch.color == color)
        .map(|swatch| swatch.name)
        .unwrap_or("カスタム")
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let current_theme = app.household.settings().theme();
    let rows = app.settings_rows();

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        match row {
            SettingsRow::Theme(theme) => {
                let mark = if *theme == current_theme { "(●)" } else { "( )" };
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("{} テーマ: ", mark)),
                    Span::styled(
                        theme.label(),
                        Style::default().bg(to_color(theme.header_background())).fg(Color::Black),
                    ),
                ])));
            }
            SettingsRow::Color { label, color } => {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled("■■ ", Style::default().fg(to_color(*color))),
                    Span::raw(format!("{}  {}  {}", label, color, swatch_name(*color))),
                ])));
            }
        }
    }

    let block = Block::default()
        .title(format!(" 設定 ─ {}の色 (←→で切替) ", app.settings_kind.label()))
        .borders(Borders::ALL)
        .border_style(app.palette.border(true));

    let list = List::new(items)
        .block(block)
        .highlight_style(app.palette.selected())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_settings_index));
    frame.render_stateful_widget(list, area, &mut state);
}
