//! Persisted user preferences
//!
//! A single value is stored: the colour theme. It lives in a small TOML file
//! (`theme = "dark"`) that is read at startup and rewritten on every toggle.
//! A missing, unreadable-as-TOML or unrecognized value means [`Theme::Light`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Config;
use crate::error::{PreferencesError, Result, SvglError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = SvglError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(SvglError::InvalidInput(format!(
                "Unknown theme '{}'. Valid themes: light, dark",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk shape; the theme is kept as text so unknown values do not fail parsing
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    theme: Option<String>,
}

/// File-backed preference storage
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the path named by `preferences.path`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.preferences.resolved_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored theme
    ///
    /// # Errors
    ///
    /// Only an I/O failure on an existing file is an error. A missing file,
    /// a corrupted file or an unknown value all yield `Theme::Light`.
    pub fn load_theme(&self) -> Result<Theme> {
        if !self.path.exists() {
            return Ok(Theme::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(PreferencesError::Read)?;

        let file: PreferencesFile = match toml::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Corrupted preferences file, using defaults: {}", e);
                return Ok(Theme::default());
            }
        };

        Ok(file
            .theme
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    /// Persist `theme`, creating parent directories if needed
    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(PreferencesError::Write)?;
        }

        let file = PreferencesFile {
            theme: Some(theme.as_str().to_string()),
        };
        let content = toml::to_string_pretty(&file).map_err(PreferencesError::Serialize)?;

        std::fs::write(&self.path, content).map_err(PreferencesError::Write)?;
        tracing::debug!(path = %self.path.display(), theme = theme.as_str(), "Saved theme");
        Ok(())
    }
}
