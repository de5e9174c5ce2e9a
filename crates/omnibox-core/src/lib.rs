#![forbid(unsafe_code)]

//! Core: selection state machine, animation primitives, and configuration
//! for omnibox suggestion lists.

pub mod animation;
pub mod config;
pub mod logging;
pub mod selection;

pub use config::{AnimationConfig, AnimationMode, ConfigError, OmniboxConfig, SelectionConfig};
pub use selection::{SelectionController, SelectionError, SelectionHost, SelectionMode};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
