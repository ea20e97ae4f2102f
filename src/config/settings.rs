//! User settings for Kakeibo
//!
//! Holds the application theme and the label→color palettes used by the
//! category charts. Stored values are overlaid on built-in defaults, so a
//! settings file only needs the keys the user actually changed.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Deserializer, Serialize};

use super::paths::KakeiboPaths;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{preset_categories, HexColor, TransactionKind, ValidationError};
use crate::storage::file_io::{read_json_or_default, write_json_atomic, LoadIssue};

/// Application color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    DefaultLightGray,
    PastelMint,
    SoftLavender,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::DefaultLightGray, Theme::PastelMint, Theme::SoftLavender];

    /// Key stored in the settings file
    pub fn key(&self) -> &'static str {
        match self {
            Self::DefaultLightGray => "default_light_gray",
            Self::PastelMint => "pastel_mint",
            Self::SoftLavender => "soft_lavender",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::DefaultLightGray => "デフォルト (ライトグレー)",
            Self::PastelMint => "パステルミント",
            Self::SoftLavender => "ソフトラベンダー",
        }
    }

    /// Look up a theme by key, falling back to the default for unknown keys
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    /// Accent color of the theme
    pub fn accent(&self) -> HexColor {
        match self {
            Self::DefaultLightGray => HexColor::rgb(0x00, 0x7a, 0xff),
            Self::PastelMint => HexColor::rgb(0x4d, 0xb6, 0xac),
            Self::SoftLavender => HexColor::rgb(0x95, 0x75, 0xcd),
        }
    }

    /// Background used for headers and the navigation bar
    pub fn header_background(&self) -> HexColor {
        match self {
            Self::DefaultLightGray => HexColor::rgb(0xe8, 0xe8, 0xe8),
            Self::PastelMint => HexColor::rgb(0xe0, 0xe8, 0xe6),
            Self::SoftLavender => HexColor::rgb(0xe4, 0xe0, 0xe8),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Theme {
    type Err = KakeiboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.key() == s.trim())
            .ok_or_else(|| KakeiboError::Config(format!("Unknown theme: {}", s)))
    }
}

/// Notification sent to subscribers after a settings change is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    ThemeChanged(Theme),
    ColorsChanged(TransactionKind),
}

/// On-disk shape of `app_settings.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default = "default_theme_key")]
    pub app_theme: String,

    #[serde(default = "default_expense_colors", deserialize_with = "lenient_palette")]
    pub expense_colors: BTreeMap<String, HexColor>,

    #[serde(default = "default_income_colors", deserialize_with = "lenient_palette")]
    pub income_colors: BTreeMap<String, HexColor>,

    /// Keys this version does not know about, preserved on save
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Read a stored palette, skipping entries that are not `#rrggbb`
fn lenient_palette<'de, D>(deserializer: D) -> Result<BTreeMap<String, HexColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(label, value)| match value.as_str().map(HexColor::parse) {
            Some(Ok(color)) => Some((label, color)),
            _ => {
                tracing::warn!(%label, %value, "ignoring invalid stored color");
                None
            }
        })
        .collect())
}

fn default_theme_key() -> String {
    Theme::default().key().to_string()
}

fn default_expense_colors() -> BTreeMap<String, HexColor> {
    default_colors(TransactionKind::Expense)
}

fn default_income_colors() -> BTreeMap<String, HexColor> {
    default_colors(TransactionKind::Income)
}

/// Built-in palette for a transaction kind
pub fn default_colors(kind: TransactionKind) -> BTreeMap<String, HexColor> {
    let pairs: &[(&str, &'static str)] = match kind {
        TransactionKind::Expense => &[
            ("食費", "#f3581f"),
            ("交通費", "#fca500"),
            ("家賃", "#007d9f"),
            ("娯楽", "#d7003a"),
            ("日用品", "#a3d638"),
            ("交際費", "#c5398a"),
            ("その他", "#7f7f7f"),
        ],
        TransactionKind::Income => &[
            ("給与", "#00a95f"),
            ("賞与", "#fde800"),
            ("副業", "#0f59a4"),
            ("臨時収入", "#f8981d"),
            ("その他", "#9e9e9e"),
        ],
    };

    pairs
        .iter()
        .map(|&(label, hex)| (label.to_string(), HexColor::from_static(hex)))
        .collect()
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            app_theme: default_theme_key(),
            expense_colors: default_expense_colors(),
            income_colors: default_income_colors(),
            extra: BTreeMap::new(),
        }
    }
}

impl SettingsFile {
    fn colors_mut(&mut self, kind: TransactionKind) -> &mut BTreeMap<String, HexColor> {
        match kind {
            TransactionKind::Expense => &mut self.expense_colors,
            TransactionKind::Income => &mut self.income_colors,
        }
    }

    fn stored_colors(&self, kind: TransactionKind) -> &BTreeMap<String, HexColor> {
        match kind {
            TransactionKind::Expense => &self.expense_colors,
            TransactionKind::Income => &self.income_colors,
        }
    }
}

/// Persisted user settings with change notification
#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    file: SettingsFile,
    load_issue: Option<LoadIssue>,
    subscribers: Vec<Sender<SettingsEvent>>,
}

impl Settings {
    /// Load settings from the data directory
    ///
    /// Never fails: a missing or malformed file yields the defaults.
    pub fn load(paths: &KakeiboPaths) -> Self {
        Self::load_from(paths.settings_file())
    }

    /// Load settings from an explicit file path
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let loaded = read_json_or_default::<SettingsFile, _>(&path);
        let load_issue = loaded.issue.filter(LoadIssue::discarded_data);

        Self {
            path,
            file: loaded.value,
            load_issue,
            subscribers: Vec::new(),
        }
    }

    /// Why stored settings were discarded, if they were
    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current theme; unknown stored keys read as the default theme
    pub fn theme(&self) -> Theme {
        Theme::from_key(&self.file.app_theme)
    }

    /// Change and persist the theme
    pub fn set_theme(&mut self, theme: Theme) -> KakeiboResult<()> {
        self.file.app_theme = theme.key().to_string();
        self.save()?;
        tracing::info!(theme = %theme, "theme changed");
        self.notify(SettingsEvent::ThemeChanged(theme));
        Ok(())
    }

    /// Palette for a kind: preset labels first in preset order, then any
    /// user-added labels alphabetically
    pub fn colors(&self, kind: TransactionKind) -> Vec<(String, HexColor)> {
        let mut merged = default_colors(kind);
        for (label, color) in self.file.stored_colors(kind) {
            merged.insert(label.clone(), *color);
        }

        let mut ordered = Vec::with_capacity(merged.len());
        for preset in preset_categories(kind) {
            if let Some(color) = merged.remove(*preset) {
                ordered.push((preset.to_string(), color));
            }
        }
        ordered.extend(merged);
        ordered
    }

    /// Color for a single label, stored value first, then the default
    pub fn color_for(&self, kind: TransactionKind, label: &str) -> Option<HexColor> {
        self.file
            .stored_colors(kind)
            .get(label)
            .copied()
            .or_else(|| default_colors(kind).get(label).copied())
    }

    /// Assign a color to a category and persist
    pub fn set_color(
        &mut self,
        kind: TransactionKind,
        category: &str,
        hex: &str,
    ) -> KakeiboResult<HexColor> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::BlankCategory.into());
        }
        let color = HexColor::parse(hex)?;

        self.file
            .colors_mut(kind)
            .insert(category.to_string(), color);
        self.save()?;

        tracing::info!(kind = %kind, category, color = %color, "category color changed");
        self.notify(SettingsEvent::ColorsChanged(kind));
        Ok(color)
    }

    /// Restore the built-in palette for a kind and persist
    pub fn reset_colors(&mut self, kind: TransactionKind) -> KakeiboResult<()> {
        *self.file.colors_mut(kind) = default_colors(kind);
        self.save()?;

        tracing::info!(kind = %kind, "category colors reset");
        self.notify(SettingsEvent::ColorsChanged(kind));
        Ok(())
    }

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<SettingsEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: SettingsEvent) {
        // Dropped receivers are pruned here
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn save(&self) -> KakeiboResult<()> {
        write_json_atomic(&self.path, &self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(temp_dir: &TempDir) -> Settings {
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        Settings::load(&paths)
    }

    #[test]
    fn test_defaults_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings_in(&temp_dir);

        assert_eq!(settings.theme(), Theme::DefaultLightGray);
        assert!(settings.load_issue().is_none());
        assert_eq!(
            settings.color_for(TransactionKind::Expense, "食費"),
            Some(HexColor::rgb(0xf3, 0x58, 0x1f))
        );
        let labels: Vec<String> = settings
            .colors(TransactionKind::Income)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["給与", "賞与", "副業", "臨時収入", "その他"]);
    }

    #[test]
    fn test_stored_values_overlay_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app_settings.json");
        fs::write(
            &path,
            r##"{"app_theme": "pastel_mint", "expense_colors": {"食費": "#000000", "ペット": "#111111"}}"##,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme(), Theme::PastelMint);

        let colors = settings.colors(TransactionKind::Expense);
        assert_eq!(colors[0], ("食費".to_string(), HexColor::rgb(0, 0, 0)));
        // Defaults still fill labels the file does not mention
        assert!(colors.iter().any(|(label, _)| label == "家賃"));
        assert_eq!(
            colors.last().unwrap(),
            &("ペット".to_string(), HexColor::rgb(0x11, 0x11, 0x11))
        );
        // Income palette absent from the file entirely
        assert_eq!(settings.colors(TransactionKind::Income).len(), 5);
    }

    #[test]
    fn test_invalid_color_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app_settings.json");
        fs::write(
            &path,
            r##"{"app_theme": "soft_lavender", "expense_colors": {"食費": "red", "家賃": "#123456", "娯楽": 7}}"##,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.load_issue().is_none());
        assert_eq!(settings.theme(), Theme::SoftLavender);
        assert_eq!(
            settings.color_for(TransactionKind::Expense, "家賃"),
            Some(HexColor::rgb(0x12, 0x34, 0x56))
        );
        // Bad entries read as their defaults
        assert_eq!(
            settings.color_for(TransactionKind::Expense, "食費"),
            Some(HexColor::rgb(0xf3, 0x58, 0x1f))
        );
        assert_eq!(
            settings.color_for(TransactionKind::Expense, "娯楽"),
            Some(HexColor::rgb(0xd7, 0x00, 0x3a))
        );
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app_settings.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme(), Theme::DefaultLightGray);
        assert!(matches!(
            settings.load_issue(),
            Some(LoadIssue::Malformed { .. })
        ));
    }

    #[test]
    fn test_set_color_persists_and_notifies() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_in(&temp_dir);
        let events = settings.subscribe();

        settings
            .set_color(TransactionKind::Expense, "食費", "#D7003A")
            .unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            SettingsEvent::ColorsChanged(TransactionKind::Expense)
        );

        let reloaded = settings_in(&temp_dir);
        assert_eq!(
            reloaded.color_for(TransactionKind::Expense, "食費"),
            Some(HexColor::rgb(0xd7, 0x00, 0x3a))
        );
    }

    #[test]
    fn test_set_color_rejects_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_in(&temp_dir);

        let err = settings
            .set_color(TransactionKind::Expense, "食費", "red")
            .unwrap_err();
        assert!(err.is_validation());

        let err = settings
            .set_color(TransactionKind::Expense, "  ", "#ff0000")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_reset_colors() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_in(&temp_dir);
        settings
            .set_color(TransactionKind::Income, "給与", "#000000")
            .unwrap();

        settings.reset_colors(TransactionKind::Income).unwrap();
        assert_eq!(
            settings.color_for(TransactionKind::Income, "給与"),
            Some(HexColor::rgb(0x00, 0xa9, 0x5f))
        );
    }

    #[test]
    fn test_theme_change_and_unknown_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_in(&temp_dir);
        let events = settings.subscribe();

        settings.set_theme(Theme::SoftLavender).unwrap();
        assert_eq!(
            events.try_recv().unwrap(),
            SettingsEvent::ThemeChanged(Theme::SoftLavender)
        );
        assert_eq!(settings_in(&temp_dir).theme(), Theme::SoftLavender);

        assert_eq!(Theme::from_key("neon"), Theme::DefaultLightGray);
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app_settings.json");
        fs::write(&path, r#"{"window_size": [800, 600]}"#).unwrap();

        let mut settings = Settings::load_from(&path);
        settings.set_theme(Theme::PastelMint).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("window_size"));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = settings_in(&temp_dir);
        drop(settings.subscribe());
        let kept = settings.subscribe();

        settings.set_theme(Theme::PastelMint).unwrap();
        assert_eq!(settings.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
