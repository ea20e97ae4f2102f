//! Terminal User Interface module
//!
//! An interactive dashboard built on ratatui: calendar, transaction list,
//! and the animated chart, plus todo and settings views and entry dialogs.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod theme;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
