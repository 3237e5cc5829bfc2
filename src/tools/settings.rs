//! Tool for reading or changing the color scheme preference
//!
//! This module implements the settings_color_scheme MCP tool. Besides the
//! stored preference it reports the appearance the client should actually
//! render, resolving `auto` against the client's own appearance.

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::store::{Appearance, ColorScheme, SettingsStore};
use crate::tools::ToolError;

/// Parameters for the color scheme tool
#[derive(Debug, Default, Deserialize)]
pub struct ColorSchemeParams {
    /// "auto", "light" or "dark"; omit to read the current value
    pub scheme: Option<String>,
    /// The client's current appearance ("light" or "dark"), used to resolve "auto"
    pub host_appearance: Option<String>,
}

/// Response from the color scheme tool
#[derive(Debug, Serialize)]
pub struct ColorSchemeResponse {
    /// Stored preference after the call
    pub color_scheme: ColorScheme,
    /// Appearance to render with
    pub appearance: Appearance,
    /// Human-readable summary
    pub message: String,
}

pub fn color_scheme<S: KeyValueStorage>(
    settings: &mut SettingsStore<S>,
    params: ColorSchemeParams,
) -> Result<ColorSchemeResponse, ToolError> {
    let host = params
        .host_appearance
        .as_deref()
        .map(str::parse::<Appearance>)
        .transpose()?;

    let summary = match params.scheme.as_deref() {
        Some(raw) => {
            let scheme: ColorScheme = raw.parse()?;
            settings.set_color_scheme(scheme);
            format!("🎨 Color scheme set to {}", scheme)
        }
        None => format!("🎨 Color scheme is {}", settings.color_scheme()),
    };

    let color_scheme = settings.color_scheme();
    let appearance = color_scheme.resolve(host);

    Ok(ColorSchemeResponse {
        color_scheme,
        appearance,
        message: format!("{} (showing {})", summary, appearance),
    })
}
