//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! It borrows the household for the whole session; every mutation goes
//! through it so the summary cache stays consistent.

use chrono::{Datelike, Duration, NaiveDate};
use std::sync::mpsc::Receiver;

use crate::chart::{ChartAnimationEngine, ChartKind, FrameTick, TickOutcome, TimerQueue};
use crate::config::palette::available_swatches;
use crate::config::{SettingsEvent, Theme};
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{HexColor, MonthlySummary, TodoItem, TransactionKind};
use crate::services::Household;

use super::dialogs::todo::TodoFormState;
use super::dialogs::transaction::{TransactionDraft, TransactionFormState};
use super::theme::Palette;
use super::widgets::ErrorInfo;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Todos,
    Settings,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Dashboard, ActiveView::Todos, ActiveView::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "家計簿",
            Self::Todos => "Todo",
            Self::Settings => "設定",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Dashboard => Self::Todos,
            Self::Todos => Self::Settings,
            Self::Settings => Self::Dashboard,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddTransaction,
    AddTodo,
    ConfirmDeleteDay(NaiveDate),
    Error(ErrorInfo),
}

/// One selectable line of the settings view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsRow {
    Theme(Theme),
    Color { label: String, color: HexColor },
}

/// Main application state
pub struct App<'a> {
    pub household: &'a mut Household,

    pub should_quit: bool,
    pub active_view: ActiveView,
    pub active_dialog: ActiveDialog,

    /// Day highlighted on the calendar; its month drives the summary and chart
    pub selected_date: NaiveDate,
    pub today: NaiveDate,

    pub chart: ChartAnimationEngine,
    pub timers: TimerQueue,
    settings_events: Receiver<SettingsEvent>,
    pub palette: Palette,

    pub status_message: Option<String>,

    pub transaction_form: TransactionFormState,
    pub todo_form: TodoFormState,

    pub selected_todo_index: usize,

    /// Which palette the settings view edits
    pub settings_kind: TransactionKind,
    pub selected_settings_index: usize,

    /// Scroll offset for the transaction list
    pub scroll_offset: usize,
}

impl<'a> App<'a> {
    pub fn new(household: &'a mut Household, today: NaiveDate) -> Self {
        let settings_events = household.settings_mut().subscribe();
        let palette = Palette::for_theme(household.settings().theme());

        let mut app = Self {
            household,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            selected_date: today,
            today,
            chart: ChartAnimationEngine::new(ChartKind::Expense),
            timers: TimerQueue::new(),
            settings_events,
            palette,
            status_message: None,
            transaction_form: TransactionFormState::new(today),
            todo_form: TodoFormState::new(today),
            selected_todo_index: 0,
            settings_kind: TransactionKind::Expense,
            selected_settings_index: 0,
            scroll_offset: 0,
        };
        app.refresh_chart();
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match dialog {
            ActiveDialog::AddTransaction => {
                self.transaction_form = TransactionFormState::new(self.selected_date);
            }
            ActiveDialog::AddTodo => {
                self.todo_form = TodoFormState::new(self.selected_date);
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Show a failed operation in the error dialog
    pub fn report_error(&mut self, error: KakeiboError) {
        tracing::error!(%error, "operation failed");
        self.active_dialog = ActiveDialog::Error(ErrorInfo::from_error(&error));
    }

    /// Year and month of the selected date
    pub fn year_month(&self) -> (i32, u32) {
        (self.selected_date.year(), self.selected_date.month())
    }

    pub fn summary(&mut self) -> MonthlySummary {
        let (year, month) = self.year_month();
        self.household.monthly_summary(year, month)
    }

    /// Start a chart run toward the selected month's data
    pub fn refresh_chart(&mut self) {
        let summary = self.summary();
        self.chart
            .show_summary(&summary, self.household.settings(), &mut self.timers);
    }

    /// Deliver a due chart frame
    pub fn on_frame(&mut self, tick: FrameTick) -> TickOutcome {
        self.chart.on_tick(tick, &mut self.timers)
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        let month_changed = (date.year(), date.month()) != self.year_month();
        self.selected_date = date;
        if month_changed {
            self.scroll_offset = 0;
            self.refresh_chart();
        }
    }

    pub fn move_days(&mut self, days: i64) {
        if let Some(date) = self.selected_date.checked_add_signed(Duration::days(days)) {
            self.select_date(date);
        }
    }

    /// Same day in a neighboring month, clamped to that month's length
    pub fn shift_month(&mut self, delta: i32) {
        let (year, month) = self.year_month();
        let index = year * 12 + month as i32 - 1 + delta;
        let (year, month) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);

        let mut day = self.selected_date.day();
        let date = loop {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                break Some(date);
            }
            if day <= 28 {
                break None;
            }
            day -= 1;
        };
        if let Some(date) = date {
            self.select_date(date);
        }
    }

    pub fn go_to_today(&mut self) {
        self.select_date(self.today);
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        if kind != self.chart.kind() {
            self.chart.set_kind(kind);
            self.refresh_chart();
        }
    }

    /// Record a validated form and restart the chart
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> KakeiboResult<()> {
        let result = self.household.add_transaction(
            draft.amount,
            &draft.category,
            draft.date,
            draft.kind,
        );
        // The ledger keeps the entry even when the write failed
        self.select_date(draft.date);
        self.refresh_chart();

        let transaction = result?;
        self.set_status(format!(
            "{} {} {} を追加しました",
            transaction.kind().label(),
            transaction.category(),
            transaction.amount()
        ));
        Ok(())
    }

    pub fn delete_day(&mut self, date: NaiveDate) -> KakeiboResult<()> {
        let result = self.household.delete_transactions_for_day(date);
        self.refresh_chart();

        let removed = result?;
        self.set_status(format!(
            "{}の取引を{}件削除しました",
            date.format("%Y-%m-%d"),
            removed
        ));
        Ok(())
    }

    pub fn add_todo(&mut self, content: &str, due: NaiveDate) -> KakeiboResult<()> {
        let todo = self.household.add_todo(content, due)?;
        self.set_status(format!("Todo「{}」を追加しました", todo.content()));
        Ok(())
    }

    /// Todos in display order
    pub fn todo_items(&self) -> Vec<&TodoItem> {
        self.household.todos().all_sorted()
    }

    pub fn selected_todo(&self) -> Option<&TodoItem> {
        self.todo_items().get(self.selected_todo_index).copied()
    }

    pub fn move_todo_selection(&mut self, delta: isize) {
        let len = self.household.todos().len();
        if len == 0 {
            self.selected_todo_index = 0;
            return;
        }
        let index = self.selected_todo_index as isize + delta;
        self.selected_todo_index = index.clamp(0, len as isize - 1) as usize;
    }

    pub fn toggle_selected_todo(&mut self) -> KakeiboResult<()> {
        let Some((id, completed)) = self
            .selected_todo()
            .map(|todo| (todo.id().clone(), todo.is_completed()))
        else {
            return Ok(());
        };
        self.household.set_todo_completed(&id, !completed)?;
        Ok(())
    }

    pub fn delete_selected_todo(&mut self) -> KakeiboResult<()> {
        let Some(id) = self.selected_todo().map(|todo| todo.id().clone()) else {
            return Ok(());
        };
        self.household.delete_todo(&id)?;
        self.move_todo_selection(0);
        Ok(())
    }

    /// Theme choices followed by the colors of the edited palette
    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows: Vec<SettingsRow> = Theme::ALL.iter().copied().map(SettingsRow::Theme).collect();
        rows.extend(
            self.household
                .settings()
                .colors(self.settings_kind)
                .into_iter()
                .map(|(label, color)| SettingsRow::Color { label, color }),
        );
        rows
    }

    pub fn move_settings_selection(&mut self, delta: isize) {
        let len = self.settings_rows().len() as isize;
        let index = self.selected_settings_index as isize + delta;
        self.selected_settings_index = index.clamp(0, len - 1) as usize;
    }

    pub fn toggle_settings_kind(&mut self) {
        self.settings_kind = self.settings_kind.toggled();
        self.move_settings_selection(0);
    }

    /// Apply the selected settings row
    ///
    /// A theme row selects that theme; a color row moves the category to the
    /// next palette swatch not used by another category.
    pub fn activate_settings_row(&mut self) -> KakeiboResult<()> {
        let rows = self.settings_rows();
        let Some(row) = rows.get(self.selected_settings_index) else {
            return Ok(());
        };

        match row {
            SettingsRow::Theme(theme) => {
                self.household.settings_mut().set_theme(*theme)?;
            }
            SettingsRow::Color { label, color } => {
                let kind = self.settings_kind;
                let used: Vec<HexColor> = self
                    .household
                    .settings()
                    .colors(kind)
                    .into_iter()
                    .filter(|(other, _)| other != label)
                    .map(|(_, color)| color)
                    .collect();
                if let Some(next) = next_swatch(*color, &used) {
                    self.household
                        .settings_mut()
                        .set_color(kind, label, &next.to_hex())?;
                }
            }
        }
        Ok(())
    }

    pub fn reset_colors(&mut self) -> KakeiboResult<()> {
        self.household.settings_mut().reset_colors(self.settings_kind)?;
        self.set_status(format!("{}の色を初期値に戻しました", self.settings_kind.label()));
        Ok(())
    }

    /// React to settings changes made during this session
    pub fn drain_settings_events(&mut self) {
        let events: Vec<SettingsEvent> = self.settings_events.try_iter().collect();
        for event in events {
            match event {
                SettingsEvent::ThemeChanged(theme) => {
                    self.palette = Palette::for_theme(theme);
                    self.set_status(format!("テーマ: {}", theme.label()));
                }
                SettingsEvent::ColorsChanged(kind) => {
                    if self.chart.kind().category_kind() == Some(kind) {
                        self.refresh_chart();
                    }
                }
            }
        }
    }
}

/// Swatch after `current` among those not in `used`, wrapping around
pub fn next_swatch(current: HexColor, used: &[HexColor]) -> Option<HexColor> {
    let available = available_swatches(used);
    if available.is_empty() {
        return None;
    }
    let next = available
        .iter()
        .position(|swatch| swatch.color == current)
        .map(|i| (i + 1) % available.len())
        .unwrap_or(0);
    Some(available[next].color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AnimationState;
    use crate::config::palette::all_swatches;
    use crate::config::KakeiboPaths;
    use tempfile::TempDir;

    fn household(temp_dir: &TempDir) -> Household {
        Household::open(KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_app_on_empty_ledger_shows_no_data() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let app = App::new(&mut household, date(2024, 5, 10));

        assert_eq!(app.chart.state(), AnimationState::NoData);
        assert!(app.timers.is_empty());
    }

    #[test]
    fn test_add_transaction_starts_chart_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, date(2024, 5, 10));

        app.add_transaction(TransactionDraft {
            amount: 1000,
            category: "食費".to_string(),
            date: date(2024, 5, 1),
            kind: TransactionKind::Expense,
        })
        .unwrap();

        assert!(app.chart.is_animating());
        assert_eq!(app.timers.len(), 1);
        assert_eq!(app.selected_date, date(2024, 5, 1));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_shift_month_clamps_day() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, date(2024, 1, 31));

        app.shift_month(1);
        assert_eq!(app.selected_date, date(2024, 2, 29));

        app.shift_month(-2);
        assert_eq!(app.selected_date, date(2023, 12, 29));
    }

    #[test]
    fn test_set_chart_kind() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        household
            .add_transaction(2500, "給与", date(2024, 5, 25), TransactionKind::Income)
            .unwrap();
        let mut app = App::new(&mut household, date(2024, 5, 10));
        assert_eq!(app.chart.state(), AnimationState::NoData);

        app.set_chart_kind(ChartKind::Income);
        assert!(app.chart.is_animating());
    }

    #[test]
    fn test_todo_selection_and_toggle() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        household.add_todo("家賃を払う", date(2024, 5, 1)).unwrap();
        household.add_todo("買い物", date(2024, 5, 2)).unwrap();
        let mut app = App::new(&mut household, date(2024, 5, 10));

        app.move_todo_selection(5);
        assert_eq!(app.selected_todo_index, 1);

        app.move_todo_selection(-5);
        app.toggle_selected_todo().unwrap();
        assert!(app.todo_items().iter().any(|t| t.is_completed()));

        app.delete_selected_todo().unwrap();
        assert_eq!(app.household.todos().len(), 1);
    }

    #[test]
    fn test_theme_row_changes_palette() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, date(2024, 5, 10));

        app.selected_settings_index = 1;
        app.activate_settings_row().unwrap();
        app.drain_settings_events();

        assert_eq!(app.household.settings().theme(), Theme::ALL[1]);
        assert_eq!(app.palette.header_background, Palette::for_theme(Theme::ALL[1]).header_background);
    }

    #[test]
    fn test_color_row_skips_colors_in_use() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, date(2024, 5, 10));

        let rows = app.settings_rows();
        let first_color = rows
            .iter()
            .position(|row| matches!(row, SettingsRow::Color { .. }))
            .unwrap();
        app.selected_settings_index = first_color;
        app.activate_settings_row().unwrap();

        let colors = app.household.settings().colors(TransactionKind::Expense);
        let (_, changed) = &colors[0];
        let others: Vec<HexColor> = colors[1..].iter().map(|(_, c)| *c).collect();
        assert!(!others.contains(changed));
    }

    #[test]
    fn test_next_swatch_wraps() {
        let all = all_swatches();
        let last = all[all.len() - 1].color;
        assert_eq!(next_swatch(last, &[]), Some(all[0].color));

        let used: Vec<HexColor> = all.iter().map(|s| s.color).collect();
        assert_eq!(next_swatch(last, &used), None);
    }
}
