//! Todo entry dialog

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{parse_date, ValidationError};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoField {
    #[default]
    Content,
    DueDate,
}

/// State for the todo form dialog
#[derive(Debug, Clone)]
pub struct TodoFormState {
    pub focused_field: TodoField,
    pub content_input: TextInput,
    pub date_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for TodoFormState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl TodoFormState {
    pub fn new(due: NaiveDate) -> Self {
        Self {
            focused_field: TodoField::Content,
            content_input: TextInput::new()
                .label("内容")
                .placeholder("やること")
                .focused(true),
            date_input: TextInput::new()
                .label("期日")
                .placeholder("YYYY-MM-DD")
                .content(due.format("%Y-%m-%d").to_string()),
            error_message: None,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            TodoField::Content => TodoField::DueDate,
            TodoField::DueDate => TodoField::Content,
        };
        self.content_input.focused = self.focused_field == TodoField::Content;
        self.date_input.focused = self.focused_field == TodoField::DueDate;
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            TodoField::Content => &mut self.content_input,
            TodoField::DueDate => &mut self.date_input,
        }
    }

    /// Content and due date, validated
    pub fn build(&self) -> Result<(String, NaiveDate), ValidationError> {
        let content = self.content_input.value().trim();
        if content.is_empty() {
            return Err(ValidationError::BlankContent);
        }
        let due = parse_date(self.date_input.value())?;
        Ok((content.to_string(), due))
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the todo dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.todo_form;
    let area = centered_rect_fixed(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Todoを追加 ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.content_input, chunks[0]);
    frame.render_widget(&form.date_input, chunks[1]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[2],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" 切替  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" 保存  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" キャンセル"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}
