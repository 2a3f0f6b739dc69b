use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::mood::Mood;

/// Top-level application configuration.
///
/// Loaded from `$XDG_CONFIG_HOME/moodboard/config.yaml` (or platform
/// equivalent).  If the file does not exist, sensible defaults are used.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Mood selected on startup.
    #[serde(default)]
    pub default_mood: Mood,

    /// Maximum log level written to the log file (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Article service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the distribution chart gets its numbers from.
    #[serde(default)]
    pub chart: ChartSettings,

    /// Display-related settings (formatting, column widths, colours).
    #[serde(default)]
    pub display: DisplayConfig,

    /// Keyboard keybindings.
    #[serde(default)]
    pub keybindings: KeyBindings,
}

/// Article service endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the article service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request path; `{mood}` is replaced by the mood slug.
    #[serde(default = "default_api_path")]
    pub path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Source of the distribution chart data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    /// Article counts of the latest fetch for each mood.
    #[default]
    Tally,
    /// The fixed `distribution` values below.
    Fixed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub source: ChartSource,

    /// Values for Happy, Sad, Angry, Surprised when `source` is `fixed`.
    #[serde(default)]
    pub distribution: Vec<f64>,
}

/// Keybinding configuration for all actions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeyBindings {
    /// Global keybindings (work in all panes).
    #[serde(default)]
    pub global: GlobalKeyBindings,

    /// Keybindings specific to the mood bar.
    #[serde(default)]
    pub moods: MoodsKeyBindings,

    /// Keybindings specific to the Articles pane.
    #[serde(default)]
    pub articles: ArticlesKeyBindings,

    /// Keybindings specific to the article view.
    #[serde(default)]
    pub article_view: ArticleViewKeyBindings,
}

/// Global keybindings (work in all panes).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalKeyBindings {
    /// Quit the application.
    #[serde(default = "default_quit")]
    pub quit: Vec<KeyBinding>,

    /// Switch focus to the next pane.
    #[serde(default = "default_focus_next")]
    pub focus_next: Vec<KeyBinding>,

    /// Switch focus to the previous pane.
    #[serde(default = "default_focus_prev")]
    pub focus_prev: Vec<KeyBinding>,

    /// Fetch the current mood again.
    #[serde(default = "default_refresh")]
    pub refresh: KeyBinding,

    /// Jump to the top of the list.
    #[serde(default = "default_jump_top")]
    pub jump_top: KeyBinding,

    /// Jump to the bottom of the list.
    #[serde(default = "default_jump_bottom")]
    pub jump_bottom: KeyBinding,

    #[serde(default = "default_mood_happy")]
    pub mood_happy: KeyBinding,

    #[serde(default = "default_mood_sad")]
    pub mood_sad: KeyBinding,

    #[serde(default = "default_mood_angry")]
    pub mood_angry: KeyBinding,

    #[serde(default = "default_mood_surprised")]
    pub mood_surprised: KeyBinding,
}

/// Keybindings for the mood bar.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoodsKeyBindings {
    /// Move the mood cursor right.
    #[serde(default = "default_mood_next")]
    pub next: Vec<KeyBinding>,

    /// Move the mood cursor left.
    #[serde(default = "default_mood_prev")]
    pub prev: Vec<KeyBinding>,

    /// Press the mood button under the cursor.
    #[serde(default = "default_mood_select")]
    pub select: Vec<KeyBinding>,
}

/// Keybindings for the Articles pane.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticlesKeyBindings {
    /// Move selection down.
    #[serde(default = "default_move_down")]
    pub move_down: Vec<KeyBinding>,

    /// Move selection up.
    #[serde(default = "default_move_up")]
    pub move_up: Vec<KeyBinding>,

    /// Scroll half-page down.
    #[serde(default = "default_scroll_half_page_down")]
    pub scroll_half_page_down: Vec<KeyBinding>,

    /// Scroll half-page up.
    #[serde(default = "default_scroll_half_page_up")]
    pub scroll_half_page_up: Vec<KeyBinding>,

    /// Open the selected article in full.
    #[serde(default = "default_open_article")]
    pub open: Vec<KeyBinding>,
}

/// Keybindings for the article view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleViewKeyBindings {
    #[serde(default = "default_move_down")]
    pub scroll_down: Vec<KeyBinding>,

    #[serde(default = "default_move_up")]
    pub scroll_up: Vec<KeyBinding>,

    #[serde(default = "default_scroll_half_page_down")]
    pub scroll_half_page_down: Vec<KeyBinding>,

    #[serde(default = "default_scroll_half_page_up")]
    pub scroll_half_page_up: Vec<KeyBinding>,

    /// Go back to the article list.
    #[serde(default = "default_close_article")]
    pub close: Vec<KeyBinding>,
}

/// A single key binding.
///
/// Can be deserialized from various formats:
/// - `"a"` - a single character
/// - `"Ctrl-a"` - control+character
/// - `"Enter"`, `"Tab"`, `"BackTab"`, `"Esc"`, `"Space"`, etc. - special keys
/// - `"Up"`, `"Down"`, `"Left"`, `"Right"` - arrow keys
/// - `"PageUp"`, `"PageDown"`, `"Home"`, `"End"` - navigation keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for GlobalKeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            focus_next: default_focus_next(),
            focus_prev: default_focus_prev(),
            refresh: default_refresh(),
            jump_top: default_jump_top(),
            jump_bottom: default_jump_bottom(),
            mood_happy: default_mood_happy(),
            mood_sad: default_mood_sad(),
            mood_angry: default_mood_angry(),
            mood_surprised: default_mood_surprised(),
        }
    }
}

impl Default for MoodsKeyBindings {
    fn default() -> Self {
        Self {
            next: default_mood_next(),
            prev: default_mood_prev(),
            select: default_mood_select(),
        }
    }
}

impl Default for ArticlesKeyBindings {
    fn default() -> Self {
        Self {
            move_down: default_move_down(),
            move_up: default_move_up(),
            scroll_half_page_down: default_scroll_half_page_down(),
            scroll_half_page_up: default_scroll_half_page_up(),
            open: default_open_article(),
        }
    }
}

impl Default for ArticleViewKeyBindings {
    fn default() -> Self {
        Self {
            scroll_down: default_move_down(),
            scroll_up: default_move_up(),
            scroll_half_page_down: default_scroll_half_page_down(),
            scroll_half_page_up: default_scroll_half_page_up(),
            close: default_close_article(),
        }
    }
}

impl GlobalKeyBindings {
    /// The direct-selection binding for `mood`.
    pub fn for_mood(&self, mood: Mood) -> &KeyBinding {
        match mood {
            Mood::Happy => &self.mood_happy,
            Mood::Sad => &self.mood_sad,
            Mood::Angry => &self.mood_angry,
            Mood::Surprised => &self.mood_surprised,
        }
    }
}

mod keybinding_serde {
    use super::*;
    use serde::de::{Error, Visitor};
    use std::fmt;

    pub fn parse_keybinding(s: &str) -> Result<KeyBinding, String> {
        let s = s.trim();

        // Shift-Tab arrives as BackTab
        if s.eq_ignore_ascii_case("shift-tab") {
            return Ok(KeyBinding {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::NONE,
            });
        }

        let (modifiers, key) = if let Some(rest) = s.strip_prefix("Ctrl-") {
            (KeyModifiers::CONTROL, rest)
        } else if let Some(rest) = s.strip_prefix("Alt-") {
            (KeyModifiers::ALT, rest)
        } else if let Some(rest) = s.strip_prefix("Shift-") {
            (KeyModifiers::SHIFT, rest)
        } else {
            (KeyModifiers::NONE, s)
        };

        let mut chars = key.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        let code = match key.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            f if f.len() > 1 && f.starts_with('f') && f[1..].parse::<u8>().is_ok() => {
                KeyCode::F(f[1..].parse().map_err(|_| format!("Unknown key: {}", key))?)
            }
            _ => match single {
                Some(c) => KeyCode::Char(c),
                None => return Err(format!("Unknown key: {}", key)),
            },
        };

        // Uppercase letters carry SHIFT, as terminals report them
        let modifiers = if single.is_some_and(|c| c.is_ascii_uppercase()) {
            modifiers | KeyModifiers::SHIFT
        } else {
            modifiers
        };

        Ok(KeyBinding { code, modifiers })
    }

    impl<'de> Deserialize<'de> for KeyBinding {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct KeyBindingVisitor;

            impl<'de> Visitor<'de> for KeyBindingVisitor {
                type Value = KeyBinding;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a key binding string like \"a\", \"Ctrl-a\", \"Enter\", etc.")
                }

                fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
                where
                    E: Error,
                {
                    parse_keybinding(s).map_err(Error::custom)
                }
            }

            deserializer.deserialize_str(KeyBindingVisitor)
        }
    }
}

pub use keybinding_serde::parse_keybinding;

impl Serialize for KeyBinding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_string())
    }
}

impl KeyBinding {
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Terminals disagree on Shift+Tab: BackTab, BackTab+SHIFT or Tab+SHIFT.
        if self.code == KeyCode::BackTab && self.modifiers == KeyModifiers::NONE {
            return (code == KeyCode::BackTab
                && (modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT))
                || (code == KeyCode::Tab && modifiers == KeyModifiers::SHIFT);
        }
        self.code == code && self.modifiers == modifiers
    }

    /// Display this keybinding as a string for hints
    pub fn display(&self) -> String {
        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::BackTab => return "Shift+Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            _ => self.key_name(),
        };

        // Uppercase characters already show their shift
        let shows_shift = matches!(self.code, KeyCode::Char(c) if c.is_ascii_uppercase());
        let modifier_str = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "Ctrl+"
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            "Alt+"
        } else if self.modifiers.contains(KeyModifiers::SHIFT) && !shows_shift {
            "Shift+"
        } else {
            ""
        };

        format!("{}{}", modifier_str, key_str)
    }

    /// Convert this keybinding to a string for serialization
    pub fn as_string(&self) -> String {
        let shows_shift = matches!(self.code, KeyCode::Char(c) if c.is_ascii_uppercase());
        let modifier_str = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "Ctrl-"
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            "Alt-"
        } else if self.modifiers.contains(KeyModifiers::SHIFT) && !shows_shift {
            "Shift-"
        } else {
            ""
        };

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => self.key_name(),
        };

        format!("{}{}", modifier_str, key_str)
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Char(c) => c.to_string(),
            _ => "?".to_string(),
        }
    }
}

// Check if a key matches any in a slice
pub fn matches_any(bindings: &[KeyBinding], code: KeyCode, modifiers: KeyModifiers) -> bool {
    bindings.iter().any(|b| b.matches(code, modifiers))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: FormatConfig,

    /// Column width configuration for the TUI layout.
    #[serde(default)]
    pub columns: ColumnConfig,

    #[serde(default)]
    pub colours: ColourConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormatConfig {
    /// Hour format for the "updated" time: 12 or 24.
    #[serde(default = "default_time_format")]
    pub time: u8,

    /// Number of content lines shown under each article title.
    #[serde(default = "default_content_lines")]
    pub content_lines: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColumnConfig {
    /// Width percentage for the articles pane.
    #[serde(default = "default_articles_width")]
    pub articles: u16,

    /// Width percentage for the chart pane.
    #[serde(default = "default_chart_width")]
    pub chart: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColourConfig {
    /// Color for the focused pane border.
    #[serde(default = "default_active_border")]
    pub active_border: String,

    /// Color for unfocused pane borders.
    #[serde(default = "default_inactive_border")]
    pub inactive_border: String,

    /// Border type (plain, double, thick, rounded).
    #[serde(default = "default_border_type")]
    pub border_type: String,

    /// Background color for the highlighted article.
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,

    /// Color for the selected mood button.
    #[serde(default = "default_selected_mood")]
    pub selected_mood: String,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            active_border: default_active_border(),
            inactive_border: default_inactive_border(),
            border_type: default_border_type(),
            highlight_bg: default_highlight_bg(),
            selected_mood: default_selected_mood(),
        }
    }
}

/// Parse a border type string into ratatui::widgets::BorderType.
pub fn parse_border_type(border_str: &str) -> Result<ratatui::widgets::BorderType, String> {
    match border_str.to_lowercase().as_str() {
        "plain" => Ok(ratatui::widgets::BorderType::Plain),
        "double" => Ok(ratatui::widgets::BorderType::Double),
        "thick" => Ok(ratatui::widgets::BorderType::Thick),
        "rounded" => Ok(ratatui::widgets::BorderType::Rounded),
        _ => Err(format!(
            "Unknown border type: {}. Valid options: plain, double, thick, rounded",
            border_str
        )),
    }
}

/// Parse a color name or `#RRGGBB` hex string into ratatui::Color.
pub fn parse_color(color_str: &str) -> Result<ratatui::style::Color, String> {
    use ratatui::style::Color;

    match color_str.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "white" => Ok(Color::White),
        "darkgray" | "dark_grey" | "dark_gray" => Ok(Color::DarkGray),
        "gray" | "grey" => Ok(Color::Gray),
        "lightred" | "light_red" => Ok(Color::LightRed),
        "lightgreen" | "light_green" => Ok(Color::LightGreen),
        "lightyellow" | "light_yellow" => Ok(Color::LightYellow),
        "lightblue" | "light_blue" => Ok(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Ok(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Ok(Color::LightCyan),
        s if s.starts_with('#') => {
            let hex = &s[1..];
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("Invalid hex color format: {}", color_str));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .map_err(|_| format!("Invalid hex color format: {}", color_str))
            };
            Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
        }
        _ => Err(format!("Unknown color: {}", color_str)),
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_path() -> String {
    "/api/news/{mood}/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_time_format() -> u8 {
    24
}

fn default_content_lines() -> u8 {
    3
}

fn default_articles_width() -> u16 {
    60
}

fn default_chart_width() -> u16 {
    40
}

fn default_active_border() -> String {
    "cyan".to_string()
}

fn default_inactive_border() -> String {
    "darkgray".to_string()
}

fn default_border_type() -> String {
    "plain".to_string()
}

fn default_highlight_bg() -> String {
    "darkgray".to_string()
}

fn default_selected_mood() -> String {
    "yellow".to_string()
}

fn kb(s: &str) -> KeyBinding {
    parse_keybinding(s).unwrap_or(KeyBinding {
        code: KeyCode::Null,
        modifiers: KeyModifiers::NONE,
    })
}

fn kbs(keys: &[&str]) -> Vec<KeyBinding> {
    keys.iter().map(|k| kb(k)).collect()
}

fn default_quit() -> Vec<KeyBinding> {
    kbs(&["q", "Ctrl-c"])
}

fn default_focus_next() -> Vec<KeyBinding> {
    kbs(&["Tab"])
}

fn default_focus_prev() -> Vec<KeyBinding> {
    kbs(&["Shift-Tab"])
}

fn default_refresh() -> KeyBinding {
    kb("r")
}

fn default_jump_top() -> KeyBinding {
    kb("g")
}

fn default_jump_bottom() -> KeyBinding {
    kb("G")
}

fn default_mood_happy() -> KeyBinding {
    kb("1")
}

fn default_mood_sad() -> KeyBinding {
    kb("2")
}

fn default_mood_angry() -> KeyBinding {
    kb("3")
}

fn default_mood_surprised() -> KeyBinding {
    kb("4")
}

fn default_mood_next() -> Vec<KeyBinding> {
    kbs(&["l", "Right"])
}

fn default_mood_prev() -> Vec<KeyBinding> {
    kbs(&["h", "Left"])
}

fn default_mood_select() -> Vec<KeyBinding> {
    kbs(&["Enter", "Space"])
}

fn default_move_down() -> Vec<KeyBinding> {
    kbs(&["j", "Down"])
}

fn default_move_up() -> Vec<KeyBinding> {
    kbs(&["k", "Up"])
}

fn default_scroll_half_page_down() -> Vec<KeyBinding> {
    kbs(&["Ctrl-d", "PageDown"])
}

fn default_scroll_half_page_up() -> Vec<KeyBinding> {
    kbs(&["Ctrl-u", "PageUp"])
}

fn default_open_article() -> Vec<KeyBinding> {
    kbs(&["Enter", "Space"])
}

fn default_close_article() -> Vec<KeyBinding> {
    kbs(&["Esc", "Backspace"])
}

impl Config {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mood: Mood::default(),
            log_level: default_log_level(),
            api: ApiConfig::default(),
            chart: ChartSettings::default(),
            display: DisplayConfig::default(),
            keybindings: KeyBindings::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_api_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            source: ChartSource::Tally,
            distribution: Vec::new(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            time: default_time_format(),
            content_lines: default_content_lines(),
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            articles: default_articles_width(),
            chart: default_chart_width(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Returns the path to the config file:
/// `$XDG_CONFIG_HOME/moodboard/config.yaml` (or platform equivalent).
pub fn config_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("moodboard").join("config.yaml"))
}

/// Load configuration from the default location.
pub fn load() -> anyhow::Result<Config> {
    load_from(&config_path()?)
}

/// Load configuration from `path`.
///
/// A missing file yields `Config::default()`.  A file that exists but
/// cannot be read or parsed is an error.
pub fn load_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}
