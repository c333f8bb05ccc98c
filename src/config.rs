//! Widget configuration.
//!
//! Every field has a default matching the built-in constants, so an empty JSON
//! object (or no configuration at all) yields the stock behavior.

use serde::{Deserialize, Serialize};

use crate::{FULL_RESOLUTION_MARKER, LABEL_SEPARATOR, THUMBNAIL_MARKER, VALUE_SEPARATOR};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid widget configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The thumbnail marker would match every URL.
    #[error("Thumbnail marker must not be empty")]
    EmptyThumbnailMarker,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub lightbox: LightboxConfig,
    pub calendar: CalendarConfig,
}

impl WidgetConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    /// Returns `ConfigError` if the JSON is malformed or a value is unusable.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::EmptyThumbnailMarker` if the thumbnail marker is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lightbox.thumbnail_marker.is_empty() {
            return Err(ConfigError::EmptyThumbnailMarker);
        }
        Ok(())
    }
}

/// How the lightbox derives a full-resolution URL from a thumbnail URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Token replaced in the thumbnail `src`
    pub thumbnail_marker: String,
    /// Replacement token for the full-resolution `src`
    pub full_marker:      String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            thumbnail_marker: THUMBNAIL_MARKER.to_owned(),
            full_marker:      FULL_RESOLUTION_MARKER.to_owned(),
        }
    }
}

impl LightboxConfig {
    /// Swaps the first thumbnail marker for the full-resolution one.
    /// URLs without the marker are returned unchanged.
    pub fn full_resolution(&self, src: &str) -> String {
        src.replacen(&self.thumbnail_marker, &self.full_marker, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Joins start and end in the bound input
    pub value_separator: String,
    /// Joins the two visible month labels
    pub label_separator: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            value_separator: VALUE_SEPARATOR.to_owned(),
            label_separator: LABEL_SEPARATOR.to_owned(),
        }
    }
}
