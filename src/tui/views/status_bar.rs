//! Status bar view
//!
//! Shows the selected day, the last status message, and key hints for the
//! active view.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App};

fn hints(view: ActiveView) -> &'static str {
    match view {
        ActiveView::Dashboard => "a:取引 t:Todo d:日削除 c:グラフ切替 []:月 g:今日 q:終了",
        ActiveView::Todos => "j/k:選択 Space:完了切替 d:削除 a:追加 q:終了",
        ActiveView::Settings => "j/k:選択 Enter:変更 ←→:収入/支出 r:初期化 q:終了",
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.selected_date.format("%Y-%m-%d")),
        Style::default().fg(app.palette.accent),
    )];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = hints(app.active_view);
    let left_width: usize = Line::from(spans.clone()).width();
    let hints_width = Line::from(hints).width();
    let padding = (area.width as usize).saturating_sub(left_width + hints_width + 1);

    spans.push(Span::raw(" ".repeat(padding.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
