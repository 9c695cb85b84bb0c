//! Artfeed: client-side state layer for a shared feed of AI-generated images.
//!
//! Artfeed keeps the state a front end needs to:
//! - Browse the shared feed, newest first
//! - Filter it locally with a debounced, case-insensitive query
//! - Generate an image from a prompt and share it with an author name
//! - Discard responses superseded by newer requests

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Gallery
//! │  - Debounce timers, in-flight tasks                 │
//! │  - State snapshots and signals                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Feed Store, Search Engine                        │
//! │  - Generation and submission workflows              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ API Layer     │
//! │ (ui/)         │   │ (worker/)     │   │ (api/)        │
//! │ - View models │   │ - Messages    │   │ - ApiClient   │
//! │ - Theme mode  │   │ - Responses   │   │ - reqwest     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), media, observability             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: HTTP contract with the backend
//! - [`domain`]: Core domain types (Post, errors, prompts)
//! - [`worker`]: Executes network operations for the state machine
//! - [`runtime`]: [`Gallery`], the async driver
//! - [`ui`]: View models, theme mode, terminal rendering
//! - [`media`]: Decoding and saving generated images
//! - `observability`: tracing subscriber with optional OpenTelemetry export
//!
//! # Configuration
//!
//! ```toml
//! # artfeed.toml
//! base_url = "http://localhost:8080"
//! debounce_ms = 500
//! request_timeout_secs = 60
//! theme = "dark"
//! trace_level = "debug"
//! trace_file = "/tmp/artfeed-otlp.json"
//! ```
//!
//! `ARTFEED_BASE_URL` and `ARTFEED_TRACE_LEVEL` override the file.
//!
//! # Example
//!
//! ```rust
//! use artfeed::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for event in [Event::Refresh, Event::SetQuery("cat".into())] {
//!     let (_changed, actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), artfeed::ArtfeedError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod media;
pub mod runtime;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Phase};
pub use domain::{ArtfeedError, Post, Result};
pub use runtime::{Gallery, Signal};
pub use ui::ThemeMode;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration.
///
/// # Example
///
/// ```toml
/// base_url = "https://artfeed.example.com"
/// theme = "dark"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root; the API paths are appended to it.
    pub base_url: String,

    /// Quiet period before a search query is applied. Default: 500
    pub debounce_ms: u64,

    /// Per-request timeout. Default: 60
    pub request_timeout_secs: u64,

    /// Initial theme mode: `light` or `dark`.
    ///
    /// Falls back to the terminal's `COLORFGBG` hint, then `light`.
    pub theme: Option<String>,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// OTLP JSON span file. Spans are only exported when set.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `debounce_ms`, `request_timeout_secs`: fall back to defaults on parse error
    /// - `theme`, `trace_level`, `trace_file`: empty values are ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use artfeed::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://api.local".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://api.local");
    /// assert_eq!(config.debounce_ms, 250);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Overlays values from `map` onto `self`.
    #[must_use]
    pub fn merge_map(self, map: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            base_url: non_empty("base_url").unwrap_or(self.base_url),
            debounce_ms: map
                .get("debounce_ms")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(self.debounce_ms),
            request_timeout_secs: map
                .get("request_timeout_secs")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(self.request_timeout_secs),
            theme: non_empty("theme").or(self.theme),
            trace_level: non_empty("trace_level").or(self.trace_level),
            trace_file: non_empty("trace_file").map(PathBuf::from).or(self.trace_file),
        }
    }

    /// Reads a TOML configuration file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ArtfeedError::Io`] if the file cannot be read and
    /// [`ArtfeedError::Config`] if it is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ArtfeedError::Config(format!("{}: {e}", path.display())))
    }

    /// Applies `ARTFEED_BASE_URL` and `ARTFEED_TRACE_LEVEL`.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("ARTFEED_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(level) = lookup("ARTFEED_TRACE_LEVEL").filter(|v| !v.trim().is_empty()) {
            self.trace_level = Some(level);
        }
        self
    }

    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Maps a `COLORFGBG` value (`"fg;bg"`) to a theme name.
fn theme_hint_from_colorfgbg(value: &str) -> Option<&'static str> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if background < 7 || background == 8 { "dark" } else { "light" })
}

/// Creates the initial application state.
///
/// The theme comes from `config.theme`, else the terminal hint, else light.
///
/// # Example
///
/// ```rust
/// use artfeed::{initialize, Config, ThemeMode};
///
/// let config = Config {
///     theme: Some("dark".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme, ThemeMode::Dark);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing artfeed");

    let hint = std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| theme_hint_from_colorfgbg(&v));
    let theme = ThemeMode::resolve(config.theme.as_deref(), hint);

    if let Some(name) = config.theme.as_deref() {
        if ThemeMode::from_name(name).is_none() {
            tracing::debug!(theme = %name, "unknown theme, using fallback");
        }
    }

    AppState::new(theme, config.debounce())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_overrides_defaults_and_ignores_bad_numbers() {
        let map = BTreeMap::from([
            ("debounce_ms".to_string(), "soon".to_string()),
            ("request_timeout_secs".to_string(), "5".to_string()),
            ("theme".to_string(), " ".to_string()),
            ("trace_file".to_string(), "/tmp/t.json".to_string()),
        ]);
        let config = Config::from_map(&map);

        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.theme, None);
        assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/t.json")));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn toml_file_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://feed.example\"\ntheme = \"dark\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://feed.example");
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = \"fast\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ArtfeedError::Config(_)));
    }

    #[test]
    fn env_overrides_apply_when_present() {
        let config = Config::default().with_overrides(|key| match key {
            "ARTFEED_BASE_URL" => Some("http://env.local".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://env.local");
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn colorfgbg_hint() {
        assert_eq!(theme_hint_from_colorfgbg("15;0"), Some("dark"));
        assert_eq!(theme_hint_from_colorfgbg("0;15"), Some("light"));
        assert_eq!(theme_hint_from_colorfgbg("default"), None);
    }

    #[test]
    fn initialize_uses_configured_debounce() {
        let config = Config {
            debounce_ms: 20,
            theme: Some("light".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.debounce, Duration::from_millis(20));
        assert_eq!(state.theme, ThemeMode::Light);
        assert!(!state.feed.is_loaded());
    }
}
