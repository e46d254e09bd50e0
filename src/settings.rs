//! Game settings and preferences
//!
//! Persisted in LocalStorage, separately from anything gameplay-related.

use serde::{Deserialize, Serialize};

use crate::sim::PieceColor;

/// Color theme for the board and pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    HighContrast,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Dark => "Dark",
            Theme::HighContrast => "High Contrast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "dark" => Some(Theme::Dark),
            "high contrast" | "high-contrast" | "contrast" => Some(Theme::HighContrast),
            _ => None,
        }
    }

    /// Board background fill
    pub fn board_fill(&self) -> &'static str {
        match self {
            Theme::Classic => "#f8f8f8",
            Theme::Dark => "#22262b",
            Theme::HighContrast => "#ffffff",
        }
    }

    /// Grid line stroke
    pub fn grid_line(&self) -> &'static str {
        match self {
            Theme::Classic => "#dddddd",
            Theme::Dark => "#3a4048",
            Theme::HighContrast => "#000000",
        }
    }

    /// Board frame stroke
    pub fn frame(&self) -> &'static str {
        match self {
            Theme::Classic => "#333333",
            Theme::Dark => "#0e1013",
            Theme::HighContrast => "#000000",
        }
    }

    /// Gradient stops for a piece color group, light to dark
    pub fn piece_gradient(&self, color: PieceColor) -> (&'static str, &'static str) {
        match (self, color) {
            (Theme::HighContrast, PieceColor::Blue) => ("#0000ff", "#0000ff"),
            (Theme::HighContrast, PieceColor::Green) => ("#008000", "#008000"),
            (Theme::HighContrast, PieceColor::Pink) => ("#ff0060", "#ff0060"),
            (_, PieceColor::Blue) => ("#4a80f5", "#1e56cc"),
            (_, PieceColor::Green) => ("#4cd964", "#2ab149"),
            (_, PieceColor::Pink) => ("#ff6b8b", "#ff2d5d"),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Color theme
    pub theme: Theme,
    /// Faint cell grid over the board
    pub show_grid_lines: bool,
    /// Dashed outline around the target piece while unsolved
    pub highlight_target: bool,
    /// Pulsing glow on the exit cell
    pub exit_pulse: bool,
    /// Reduced motion (disables the pulse animation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            show_grid_lines: true,
            highlight_target: true,
            exit_pulse: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective exit pulse (respects reduced_motion)
    pub fn effective_exit_pulse(&self) -> bool {
        self.exit_pulse && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "slide_escape_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
