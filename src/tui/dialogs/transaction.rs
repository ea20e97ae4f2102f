//! Transaction entry dialog
//!
//! Modal form for recording income or expense. Tab moves between fields,
//! Up/Down on the category field steps through the preset list, and Space on
//! the kind field toggles income/expense.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{parse_date, preset_categories, TransactionKind, ValidationError, Yen};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::amount_color;
use crate::tui::widgets::input::TextInput;

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    Kind,
    #[default]
    Amount,
    Category,
    Date,
}

impl TransactionField {
    pub fn next(self) -> Self {
        match self {
            Self::Kind => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Kind,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Kind => Self::Date,
            Self::Amount => Self::Kind,
            Self::Category => Self::Amount,
            Self::Date => Self::Category,
        }
    }
}

/// Validated form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: i64,
    pub category: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

/// State for the transaction form dialog
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub kind: TransactionKind,
    pub amount_input: TextInput,
    pub category_input: TextInput,
    pub date_input: TextInput,
    /// Position in the preset list while cycling with Up/Down
    preset_index: Option<usize>,
    pub error_message: Option<String>,
}

impl Default for TransactionFormState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl TransactionFormState {
    /// Empty expense form dated `date`
    pub fn new(date: NaiveDate) -> Self {
        let mut state = Self {
            focused_field: TransactionField::Amount,
            kind: TransactionKind::Expense,
            amount_input: TextInput::new().label("金額").placeholder("1000"),
            category_input: TextInput::new().label("カテゴリ").placeholder("↑↓で候補"),
            date_input: TextInput::new()
                .label("日付")
                .placeholder("YYYY-MM-DD")
                .content(date.format("%Y-%m-%d").to_string()),
            preset_index: None,
            error_message: None,
        };
        state.update_focus();
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount_input.focused = self.focused_field == TransactionField::Amount;
        self.category_input.focused = self.focused_field == TransactionField::Category;
        self.date_input.focused = self.focused_field == TransactionField::Date;
    }

    /// The focused text field, if the focus is on one
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Kind => None,
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Category => Some(&mut self.category_input),
            TransactionField::Date => Some(&mut self.date_input),
        }
    }

    /// Switch income/expense; a preset category of the old kind is cleared
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
        if self.preset_index.is_some() {
            self.category_input.clear();
            self.preset_index = None;
        }
    }

    /// Step through the presets for the current kind
    pub fn cycle_preset(&mut self, forward: bool) {
        let presets = preset_categories(self.kind);
        let len = presets.len();
        let index = match (self.preset_index, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.preset_index = Some(index);
        self.category_input.set_value(presets[index]);
    }

    /// Typing in the category field leaves preset cycling
    pub fn category_edited(&mut self) {
        self.preset_index = None;
    }

    /// Parse and validate every field
    pub fn build(&self) -> Result<TransactionDraft, ValidationError> {
        let amount_text = self.amount_input.value().trim();
        let amount: i64 = amount_text
            .replace(',', "")
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(amount_text.to_string()))?;
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        if amount > Yen::MAX_ENTRY {
            return Err(ValidationError::AmountTooLarge(amount));
        }

        let category = self.category_input.value().trim();
        if category.is_empty() {
            return Err(ValidationError::BlankCategory);
        }

        let date = parse_date(self.date_input.value())?;

        Ok(TransactionDraft {
            amount,
            category: category.to_string(),
            date,
            kind: self.kind,
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.transaction_form;
    let area = centered_rect_fixed(52, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" 取引を追加 ")
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
            Constraint::Length(1), // Kind
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    render_kind_toggle(frame, chunks[0], form);
    frame.render_widget(&form.amount_input, chunks[1]);
    frame.render_widget(&form.category_input, chunks[2]);
    frame.render_widget(&form.date_input, chunks[3]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" 次へ  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" 保存  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" キャンセル"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

fn render_kind_toggle(frame: &mut Frame, area: Rect, form: &TransactionFormState) {
    let option = |kind: TransactionKind| {
        let selected = form.kind == kind;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(amount_color(kind == TransactionKind::Income))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", kind.label()), style)
    };

    let label_style = if form.focused_field == TransactionField::Kind {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let line = Line::from(vec![
        Span::styled("種類", label_style),
        Span::raw(": "),
        option(TransactionKind::Expense),
        Span::raw(" "),
        option(TransactionKind::Income),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
