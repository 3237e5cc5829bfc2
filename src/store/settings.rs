//! Settings store
//!
//! A second, independent persisted record holding the user's color scheme
//! preference. It shares the habit store's storage contract: read once at
//! startup, written on every change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::storage::KeyValueStorage;

/// Record key holding the settings
pub const SETTINGS_RECORD_KEY: &str = "settings-storage";

/// User's color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Follow the host's appearance
    #[default]
    Auto,
    Light,
    Dark,
}

/// A concrete appearance after resolving `auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appearance::Light => write!(f, "light"),
            Appearance::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Appearance {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            other => Err(DomainError::InvalidValue {
                message: format!("'{}' is not an appearance. Valid options: light, dark", other),
            }),
        }
    }
}

impl ColorScheme {
    /// Resolve the preference against the host's appearance
    ///
    /// An unknown host appearance resolves `auto` to light.
    pub fn resolve(self, host: Option<Appearance>) -> Appearance {
        match self {
            ColorScheme::Light => Appearance::Light,
            ColorScheme::Dark => Appearance::Dark,
            ColorScheme::Auto => host.unwrap_or(Appearance::Light),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorScheme::Auto => "auto",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ColorScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorScheme::Auto),
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(DomainError::InvalidValue {
                message: format!(
                    "'{}' is not a color scheme. Valid options: auto, light, dark",
                    other
                ),
            }),
        }
    }
}

/// Persisted settings record: `{ "colorScheme": "auto" }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

pub struct SettingsStore<S: KeyValueStorage> {
    storage: S,
    settings: Settings,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    /// Load settings, falling back to defaults for a missing or bad record
    pub fn load(storage: S) -> Self {
        let settings = match storage.get(SETTINGS_RECORD_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding malformed settings record: {}", e);
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Could not read settings record, using defaults: {}", e);
                Settings::default()
            }
        };

        Self { storage, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.settings.color_scheme
    }

    /// Change the color scheme and persist the record
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.settings.color_scheme = scheme;
        debug!("Color scheme set to {}", scheme);
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.settings) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(SETTINGS_RECORD_KEY, &raw) {
                    warn!("Could not persist settings: {}", e);
                }
            }
            Err(e) => warn!("Could not serialize settings: {}", e),
        }
    }
}
