//! TUI Views module
//!
//! The dashboard (summary, calendar, transactions, chart), the todo list,
//! and the settings view, plus the tab and status bars.

pub mod calendar;
pub mod chart;
pub mod dashboard;
pub mod settings;
pub mod status_bar;
pub mod todos;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::{error_dialog_area, ErrorDialog};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Todos => todos::render(frame, app, layout.main),
        ActiveView::Settings => settings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(" 家計簿 ", app.palette.header())];
    for (i, view) in ActiveView::ALL.iter().enumerate() {
        spans.push(Span::raw(" "));
        let style = if *view == app.active_view {
            app.palette.selected()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, view.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::AddTransaction => dialogs::transaction::render(frame, app),
        ActiveDialog::AddTodo => dialogs::todo::render(frame, app),
        ActiveDialog::ConfirmDeleteDay(date) => dialogs::confirm::render(frame, app, *date),
        ActiveDialog::Error(info) => {
            let area = error_dialog_area(frame.area());
            frame.render_widget(ErrorDialog::new(info), area);
        }
        ActiveDialog::None => {}
    }
}
