//! Light/dark theme preference.
//!
//! The preference is process-wide presentation state kept outside the feed
//! and workflow logic. It has a defined initialization order and a pure
//! toggle; persisting it is left to the presentation layer.
//!
//! Initialization order:
//! 1. An explicitly configured mode (`"light"` / `"dark"`)
//! 2. A system hint (e.g. a `COLORFGBG`-style or desktop setting)
//! 3. [`ThemeMode::Light`]
//!
//! ```rust
//! use artfeed::ui::ThemeMode;
//!
//! let mode = ThemeMode::resolve(None, Some("dark"));
//! assert_eq!(mode, ThemeMode::Dark);
//! assert_eq!(mode.toggle(), ThemeMode::Light);
//! ```

use serde::{Deserialize, Serialize};

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Accent colors for terminal rendering, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub author: &'static str,
    pub text_dim: &'static str,
    pub error: &'static str,
}

impl ThemeMode {
    /// Parses a mode name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Resolves the initial mode from configuration, then a system hint.
    #[must_use]
    pub fn resolve(configured: Option<&str>, system_hint: Option<&str>) -> Self {
        configured
            .and_then(Self::from_name)
            .or_else(|| system_hint.and_then(Self::from_name))
            .unwrap_or_default()
    }

    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Colors suited to this mode's background.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                heading: "#4f46e5",
                author: "#16a34a",
                text_dim: "#6b7280",
                error: "#dc2626",
            },
            Self::Dark => Palette {
                heading: "#818cf8",
                author: "#4ade80",
                text_dim: "#9ca3af",
                error: "#f87171",
            },
        }
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}
