//! NotePane: a Zellij plugin for browsing, searching, and creating notes
//! stored behind a remote notes API.
//!
//! NotePane provides:
//! - A paginated note list fetched from the API, cached per (page, search)
//! - Debounced search: typing only re-queries once input pauses
//! - Last-known-good data while a new page or search loads
//! - A toast when a query comes back empty
//! - A modal form for creating notes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  keys / timers / web replies → Event                │
//! │  Action → set_timeout / web_request / hide_self     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debouncing, query cache          │
//! │  - Notifications, creation modal                    │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────┐                   ┌───────────────┐
//! │ UI Layer      │                   │ API Layer     │
//! │ (ui/)         │                   │ (api/)        │
//! │ - Rendering   │                   │ - Requests    │
//! │ - Theming     │                   │ - Replies     │
//! │ - Components  │                   │ - Trace ctx   │
//! └───────────────┘                   └───────────────┘
//!         │                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Note model (domain/note)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/notepane.wasm" {
//!         api_url "https://notehub-public.goit.study/api/notes"
//!         api_token "..."
//!         per_page "12"
//!         debounce_ms "300"
//!         toast_ms "3000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use notepane::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchNotes { page: 1, .. }]));
//! # Ok::<(), notepane::NotesError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with truecolor

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Note, NotesError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Notes collection queried when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api/notes";

const DEFAULT_PER_PAGE: u32 = 12;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TOAST_MS: u64 = 3000;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Notes collection endpoint. Default: [`DEFAULT_API_URL`]
    pub api_url: String,

    /// Bearer token sent with every request, if set.
    pub api_token: Option<String>,

    /// Notes per page requested from the API. Default: 12
    pub per_page: u32,

    /// Quiet period before typed search input is committed. Default: 300
    pub debounce_ms: u64,

    /// How long toasts stay on screen. Default: 3000
    pub toast_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the host home.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            toast_ms: DEFAULT_TOAST_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparseable numbers fall back to their defaults; blank strings count
    /// as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notepane::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "20".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.per_page, 20);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let number = |key: &str| config.get(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            api_url: text("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: text("api_token"),
            per_page: config
                .get("per_page")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(DEFAULT_PER_PAGE),
            debounce_ms: number("debounce_ms").unwrap_or(DEFAULT_DEBOUNCE_MS),
            toast_ms: number("toast_ms").unwrap_or(DEFAULT_TOAST_MS),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Checks values that would make the plugin unusable.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Config`] for an empty API URL or a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(NotesError::Config("api_url must not be empty".to_string()));
        }
        if self.per_page == 0 {
            return Err(NotesError::Config("per_page must be at least 1".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

/// Initializes the application state from configuration.
///
/// Loads the theme (file, then name, then default) and sets up the debounce
/// and toast intervals. Does not issue any request; the runtime sends
/// [`Event::Start`] once web access is granted.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing notepane plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.debounce(), config.toast_ttl())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn values_are_trimmed_and_blank_means_unset() {
        let config = Config::from_zellij(&map(&[
            ("api_url", " https://example.com/notes "),
            ("api_token", "   "),
            ("toast_ms", "1500"),
            ("theme", "catppuccin-latte"),
        ]));
        assert_eq!(config.api_url, "https://example.com/notes");
        assert_eq!(config.api_token, None);
        assert_eq!(config.toast_ttl(), Duration::from_millis(1500));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let config = Config {
            per_page: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(NotesError::Config(_))));

        let config = Config {
            api_url: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(NotesError::Config(_))));
    }

    #[test]
    fn initialize_prefers_theme_file_over_name() {
        let mut theme = Theme::from_name("catppuccin-frappe").unwrap();
        theme.name = "custom".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes())
            .unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "custom");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
        assert_eq!(state.page, 1);
        assert!(state.committed_search.is_empty());
    }
}
