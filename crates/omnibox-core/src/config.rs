#![forbid(unsafe_code)]

//! Configuration for suggestion-list selection and entry animation.
//!
//! Values come from [`Default`], from serde (with the `serde` feature), or
//! from environment variables via [`OmniboxConfig::from_env`]. Environment
//! parsing never fails: unparseable values keep their default and are
//! reported through [`OmniboxConfigParse::errors`].
//!
//! | Variable | Field | Values |
//! |---|---|---|
//! | `OMNIBOX_SELECTION_MODE` | `selection.mode` | `saturating` \| `looping` |
//! | `OMNIBOX_DEFAULT_POSITION` | `selection.default_position` | index \| `none` |
//! | `OMNIBOX_PREFETCH_DISTANCE` | `selection.prefetch_distance` | non-negative integer |
//! | `OMNIBOX_ANIMATION_MODE` | `animation.mode` | `disabled` \| `ime_synced` \| `unsynced` |
//! | `OMNIBOX_ANIMATION_OFFSET` | `animation.starting_offset` | finite float |
//! | `OMNIBOX_ANIMATION_DURATION_MS` | `animation.duration_ms` | positive integer |

use std::env;
use std::fmt;
use std::time::Duration;

use crate::selection::SelectionMode;

pub const ENV_SELECTION_MODE: &str = "OMNIBOX_SELECTION_MODE";
pub const ENV_DEFAULT_POSITION: &str = "OMNIBOX_DEFAULT_POSITION";
pub const ENV_PREFETCH_DISTANCE: &str = "OMNIBOX_PREFETCH_DISTANCE";
pub const ENV_ANIMATION_MODE: &str = "OMNIBOX_ANIMATION_MODE";
pub const ENV_ANIMATION_OFFSET: &str = "OMNIBOX_ANIMATION_OFFSET";
pub const ENV_ANIMATION_DURATION_MS: &str = "OMNIBOX_ANIMATION_DURATION_MS";

/// Items realized ahead of the selection in virtualized lists.
pub const DEFAULT_PREFETCH_DISTANCE: usize = 2;
/// Distance the list travels while fading in.
pub const DEFAULT_STARTING_OFFSET: f32 = 20.0;
/// Duration of the unsynced entry animation.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Selection behaviour shared by every list variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionConfig {
    /// Boundary policy for next/previous navigation.
    pub mode: SelectionMode,
    /// Fallback when the selected item disappears; `None` parks.
    pub default_position: Option<usize>,
    /// How many items past the selection a live container is asked to
    /// realize.
    pub prefetch_distance: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Saturating,
            default_position: None,
            prefetch_distance: DEFAULT_PREFETCH_DISTANCE,
        }
    }
}

/// Which driver animates the suggestion list into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnimationMode {
    /// The list appears without animation.
    Disabled,
    /// Follow the keyboard (IME) inset animation frame by frame.
    #[default]
    ImeSynced,
    /// Run a fixed-duration fade independent of the keyboard.
    Unsynced,
}

impl AnimationMode {
    /// Parse a mode name, case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Some(Self::Disabled),
            "ime_synced" | "ime" | "synced" => Some(Self::ImeSynced),
            "unsynced" | "timed" => Some(Self::Unsynced),
            _ => None,
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::ImeSynced => f.write_str("ime_synced"),
            Self::Unsynced => f.write_str("unsynced"),
        }
    }
}

/// Entry animation parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    pub mode: AnimationMode,
    /// Vertical offset the list starts at, relative to its resting place.
    pub starting_offset: f32,
    /// Duration of the unsynced fade, in milliseconds.
    pub duration_ms: u64,
}

impl AnimationConfig {
    /// Unsynced fade duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            mode: AnimationMode::ImeSynced,
            starting_offset: DEFAULT_STARTING_OFFSET,
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OmniboxConfig {
    pub selection: SelectionConfig,
    pub animation: AnimationConfig,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Configuration parse result with diagnostics.
#[derive(Debug, Clone)]
pub struct OmniboxConfigParse {
    pub config: OmniboxConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl OmniboxConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> OmniboxConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        let offset = self.animation.starting_offset;
        if !offset.is_finite() {
            errors.push(ConfigError::new(
                "starting_offset",
                offset.to_string(),
                "must be finite",
            ));
        }
        if self.animation.mode == AnimationMode::Unsynced && self.animation.duration_ms == 0 {
            errors.push(ConfigError::new(
                "duration_ms",
                "0",
                "unsynced animation needs a positive duration",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> OmniboxConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = OmniboxConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_SELECTION_MODE) {
        match SelectionMode::parse(&value) {
            Some(parsed) => config.selection.mode = parsed,
            None => errors.push(ConfigError::new(
                "mode",
                value,
                "expected saturating|looping",
            )),
        }
    }

    if let Some(value) = get(ENV_DEFAULT_POSITION) {
        match parse_optional_index(&value) {
            Some(parsed) => config.selection.default_position = parsed,
            None => errors.push(ConfigError::new(
                "default_position",
                value,
                "expected index or none",
            )),
        }
    }

    if let Some(value) = get(ENV_PREFETCH_DISTANCE) {
        match value.trim().parse::<usize>() {
            Ok(parsed) => config.selection.prefetch_distance = parsed,
            Err(_) => errors.push(ConfigError::new(
                "prefetch_distance",
                value,
                "expected non-negative integer",
            )),
        }
    }

    if let Some(value) = get(ENV_ANIMATION_MODE) {
        match AnimationMode::parse(&value) {
            Some(parsed) => config.animation.mode = parsed,
            None => errors.push(ConfigError::new(
                "animation_mode",
                value,
                "expected disabled|ime_synced|unsynced",
            )),
        }
    }

    if let Some(value) = get(ENV_ANIMATION_OFFSET) {
        match value.trim().parse::<f32>() {
            Ok(parsed) if parsed.is_finite() => config.animation.starting_offset = parsed,
            _ => errors.push(ConfigError::new(
                "starting_offset",
                value,
                "expected finite float",
            )),
        }
    }

    if let Some(value) = get(ENV_ANIMATION_DURATION_MS) {
        match value.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => config.animation.duration_ms = parsed,
            _ => errors.push(ConfigError::new(
                "duration_ms",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Err(validation) = config.validate() {
        errors.extend(validation);
    }
    for error in &errors {
        crate::warn!(field = error.field, value = %error.value, "{}", error.message);
    }

    OmniboxConfigParse { config, errors }
}

fn parse_optional_index(value: &str) -> Option<Option<usize>> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("none") || trimmed.is_empty() {
        return Some(None);
    }
    trimmed.parse::<usize>().ok().map(Some)
}
