//! Todo list view

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let todos = app.todo_items();
    let block = Block::default()
        .title(format!(" Todo ({}) ", todos.len()))
        .borders(Borders::ALL)
        .border_style(app.palette.border(true));

    let items: Vec<ListItem> = todos
        .iter()
        .map(|todo| {
            let (mark, style) = if todo.is_completed() {
                (
                    "[x]",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else if todo.due_date() < app.today {
                ("[ ]", Style::default().fg(Color::Red))
            } else {
                ("[ ]", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", mark)),
                Span::styled(todo.due_date().format("%Y-%m-%d").to_string(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(todo.content().to_string(), style),
            ]))
        })
        .collect();

    if items.is_empty() {
        let empty = List::new(vec![ListItem::new("Todoはありません（a で追加）")]).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(app.palette.selected())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_todo_index));
    frame.render_stateful_widget(list, area, &mut state);
}
