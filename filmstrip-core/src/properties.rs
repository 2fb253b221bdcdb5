//! Per-format configurable properties.
//!
//! Every output format declares a set of named properties with defaults
//! (bitrate override, subtitle burn-in, fourcc tag). Values live in a
//! `PropertyRegistry` keyed by format identity, so every session of a given
//! format observes the same table. The registry is shared between sessions
//! via `Arc`; setting a property through one handle affects all of them.
//!
//! Setting a name the format does not declare is a logged no-op, never an
//! error: property sets may be applied speculatively across formats.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::formats::FormatId;

/// Property name for the bitrate override.
pub const PROP_BITRATE: &str = "Bitrate";
/// Property name for the subtitle burn-in toggle.
pub const PROP_RENDER_SUBTITLE: &str = "RenderSubtitle";
/// Property name for the four-character-code tag of the MPEG4 formats.
pub const PROP_FFOURCC: &str = "FFOURCC";

/// Sentinel returned for properties without a format-specific default.
/// A bitrate override left at this value defers to the profile's bitrate.
pub const DEFAULT_SENTINEL: &str = "<default>";

/// Shared table of property values, keyed by format identity.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    values: Mutex<HashMap<(FormatId, String), String>>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property for all sessions of `format`. Undeclared names are
    /// ignored with a warning.
    pub fn set(&self, format: FormatId, name: &str, value: impl Into<String>) {
        let strategy = format.strategy();
        if strategy.properties().contains(&name) {
            self.values
                .lock()
                .expect("property registry lock poisoned")
                .insert((format, name.to_string()), value.into());
        } else {
            log::warn!("{}: unknown property: {}", strategy.name(), name);
        }
    }

    /// Returns the set value, or the format's declared default when unset.
    pub fn get(&self, format: FormatId, name: &str) -> String {
        self.values
            .lock()
            .expect("property registry lock poisoned")
            .get(&(format, name.to_string()))
            .cloned()
            .unwrap_or_else(|| format.strategy().default_property(name))
    }

    /// True when the property still equals its declared default.
    pub fn is_default(&self, format: FormatId, name: &str) -> bool {
        self.get(format, name) == format.strategy().default_property(name)
    }
}
