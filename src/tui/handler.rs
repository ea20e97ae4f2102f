//! Event handler for the TUI
//!
//! Routes key presses to the open dialog or the active view, and feeds due
//! chart frames back to the engine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chart::ChartKind;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs::transaction::TransactionField;
use super::event::Event;
use super::widgets::TextInput;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Frame(tick) => {
            app.on_frame(tick);
        }
        // The next draw picks up the new size
        Event::Resize(_, _) => {}
    }
    app.drain_settings_events();
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Tab => {
            app.active_view = app.active_view.next();
            app.clear_status();
            return;
        }
        KeyCode::Char('1') => {
            app.active_view = ActiveView::Dashboard;
            return;
        }
        KeyCode::Char('2') => {
            app.active_view = ActiveView::Todos;
            return;
        }
        KeyCode::Char('3') => {
            app.active_view = ActiveView::Settings;
            return;
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Dashboard => handle_dashboard_key(app, key),
        ActiveView::Todos => handle_todos_key(app, key),
        ActiveView::Settings => handle_settings_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
        KeyCode::PageUp | KeyCode::Char('[') => app.shift_month(-1),
        KeyCode::PageDown | KeyCode::Char(']') => app.shift_month(1),
        KeyCode::Char('g') => app.go_to_today(),
        KeyCode::Char('c') => app.set_chart_kind(app.chart.kind().next()),
        KeyCode::Char('C') => app.set_chart_kind(app.chart.kind().previous()),
        KeyCode::Char('e') => app.set_chart_kind(ChartKind::Expense),
        KeyCode::Char('i') => app.set_chart_kind(ChartKind::Income),
        KeyCode::Char('b') => app.set_chart_kind(ChartKind::Balance),
        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddTransaction),
        KeyCode::Char('t') => app.open_dialog(ActiveDialog::AddTodo),
        KeyCode::Char('d') => {
            let date = app.selected_date;
            if app.household.ledger().transactions_for_day(date).is_empty() {
                app.set_status(format!("{}の取引はありません", date.format("%Y-%m-%d")));
            } else {
                app.open_dialog(ActiveDialog::ConfirmDeleteDay(date));
            }
        }
        KeyCode::Char('J') => app.scroll_offset = app.scroll_offset.saturating_add(1),
        KeyCode::Char('K') => app.scroll_offset = app.scroll_offset.saturating_sub(1),
        _ => {}
    }
}

fn handle_todos_key(app: &mut App, key: KeyEvent) {
    let result = match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_todo_selection(-1);
            Ok(())
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_todo_selection(1);
            Ok(())
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_todo(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_todo(),
        KeyCode::Char('a') => {
            app.open_dialog(ActiveDialog::AddTodo);
            Ok(())
        }
        _ => Ok(()),
    };
    if let Err(error) = result {
        app.report_error(error);
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    let result = match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_settings_selection(-1);
            Ok(())
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_settings_selection(1);
            Ok(())
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.toggle_settings_kind();
            Ok(())
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_settings_row(),
        KeyCode::Char('r') => app.reset_colors(),
        _ => Ok(()),
    };
    if let Err(error) = result {
        app.report_error(error);
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::None => {}
        ActiveDialog::AddTransaction => handle_transaction_dialog_key(app, key),
        ActiveDialog::AddTodo => handle_todo_dialog_key(app, key),
        ActiveDialog::ConfirmDeleteDay(date) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.close_dialog();
                if let Err(error) = app.delete_day(date) {
                    app.report_error(error);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::Error(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                app.close_dialog();
            }
        }
    }
}

fn handle_transaction_dialog_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.transaction_form;
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::Down if form.focused_field != TransactionField::Category => {
            form.next_field()
        }
        KeyCode::BackTab | KeyCode::Up if form.focused_field != TransactionField::Category => {
            form.prev_field()
        }
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Up => form.cycle_preset(false),
        KeyCode::Down => form.cycle_preset(true),
        KeyCode::Enter => match form.build() {
            Ok(draft) => {
                app.close_dialog();
                if let Err(error) = app.add_transaction(draft) {
                    app.report_error(error);
                }
            }
            Err(error) => form.set_error(error.to_string()),
        },
        _ if form.focused_field == TransactionField::Kind => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                form.toggle_kind();
            }
        }
        _ => {
            let is_category = form.focused_field == TransactionField::Category;
            if let Some(input) = form.focused_input() {
                if edit_input(input, key) && is_category {
                    form.category_edited();
                }
            }
            form.clear_error();
        }
    }
}

fn handle_todo_dialog_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.todo_form;
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
        KeyCode::Enter => match form.build() {
            Ok((content, due)) => {
                app.close_dialog();
                if let Err(error) = app.add_todo(&content, due) {
                    app.report_error(error);
                }
            }
            Err(error) => form.set_error(error.to_string()),
        },
        _ => {
            edit_input(form.focused_input(), key);
        }
    }
}

/// Apply an editing key to a text field; true if the text changed
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_start();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KakeiboPaths;
    use crate::models::TransactionKind;
    use crate::services::Household;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn household(temp_dir: &TempDir) -> Household {
        Household::open(KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap()
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_quit() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_cycles_views() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.active_view, ActiveView::Todos);
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.active_view, ActiveView::Dashboard);
    }

    #[test]
    fn test_add_transaction_through_dialog() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.active_dialog, ActiveDialog::AddTransaction);

        type_text(&mut app, "1000");
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.transaction_form.category_input.value(), "食費");
        handle_event(&mut app, key(KeyCode::Enter));

        assert!(!app.has_dialog());
        let all = app.household.ledger().all_transactions();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category(), "食費");
        assert_eq!(all[0].date(), may(10));
        assert!(app.chart.is_animating());
    }

    #[test]
    fn test_invalid_amount_keeps_dialog_open() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "0");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.active_dialog, ActiveDialog::AddTransaction);
        assert!(app.transaction_form.error_message.is_some());
        assert!(app.household.ledger().is_empty());
    }

    #[test]
    fn test_delete_day_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        household
            .add_transaction(1000, "食費", may(10), TransactionKind::Expense)
            .unwrap();
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmDeleteDay(may(10)));

        handle_event(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.household.ledger().len(), 1);

        handle_event(&mut app, key(KeyCode::Char('d')));
        handle_event(&mut app, key(KeyCode::Char('y')));
        assert!(app.household.ledger().is_empty());
        assert!(app.household.monthly_summary(2024, 5).is_empty());
    }

    #[test]
    fn test_delete_day_without_transactions_only_sets_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('d')));
        assert!(!app.has_dialog());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_add_todo_through_dialog() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char('t')));
        type_text(&mut app, "買い物");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.household.todos().uncompleted_count_for_day(may(10)), 1);
    }

    #[test]
    fn test_frame_events_advance_chart() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        household
            .add_transaction(1000, "食費", may(10), TransactionKind::Expense)
            .unwrap();
        let mut app = App::new(&mut household, may(10));

        let far_future = std::time::Instant::now() + std::time::Duration::from_secs(60);
        while let Some(tick) = app.timers.pop_due(far_future).pop() {
            handle_event(&mut app, Event::Frame(tick));
        }

        assert_eq!(app.chart.frames_rendered(), 31);
        assert!(app.chart.last_frame().unwrap().is_final());
    }

    #[test]
    fn test_month_navigation_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut household = household(&temp_dir);
        let mut app = App::new(&mut household, may(10));

        handle_event(&mut app, key(KeyCode::Char(']')));
        assert_eq!(app.year_month(), (2024, 6));
        handle_event(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.selected_date, may(10));
    }
}
