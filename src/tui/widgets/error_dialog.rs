//! Error dialog widget
//!
//! Shows a failed operation with a short recovery hint.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::KakeiboError;

/// What the error dialog shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub title: String,
    pub details: String,
    pub suggestions: Vec<String>,
}

impl ErrorInfo {
    pub fn from_error(error: &KakeiboError) -> Self {
        let (title, suggestions) = match error {
            KakeiboError::Storage(_) | KakeiboError::Io(_) => (
                "保存エラー",
                vec![
                    "データフォルダに書き込めるか確認してください".to_string(),
                    "入力内容は画面上に残っていますが、ファイルには保存されていません".to_string(),
                ],
            ),
            KakeiboError::Validation(_) => (
                "入力エラー",
                vec!["入力内容を確認してもう一度お試しください".to_string()],
            ),
            KakeiboError::NotFound { .. } | KakeiboError::Ambiguous { .. } => {
                ("見つかりません", Vec::new())
            }
            KakeiboError::Config(_) | KakeiboError::Json(_) => (
                "設定エラー",
                vec!["app_settings.json の内容を確認してください".to_string()],
            ),
            KakeiboError::Tui(_) => ("画面エラー", Vec::new()),
        };

        Self {
            title: title.to_string(),
            details: error.to_string(),
            suggestions,
        }
    }

    pub fn simple(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error }
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let lines: Vec<Line> = self
            .error
            .suggestions
            .iter()
            .map(|s| Line::from(vec![Span::raw("・"), Span::raw(s.as_str())]))
            .collect();
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        Paragraph::new("Esc / Enter で閉じる")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Centered area for the error dialog
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 16).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}
