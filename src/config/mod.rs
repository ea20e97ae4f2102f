//! Configuration module for Kakeibo
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Theme and chart palette settings

pub mod palette;
pub mod paths;
pub mod settings;

pub use paths::KakeiboPaths;
pub use settings::{Settings, SettingsEvent, Theme};
