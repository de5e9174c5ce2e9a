#![forbid(unsafe_code)]

//! Logging facade for selection and animation transitions.
//!
//! With the `tracing` feature enabled the macros below are the `tracing`
//! macros. Without it they expand to nothing, so call sites never need their
//! own `#[cfg(feature = "tracing")]` guards.
//!
//! Levels used across the workspace:
//!
//! - `debug`: position changes, session start/end, cancellations
//! - `trace`: ignored inputs (rejected positions, foreign animation ticks)
//! - `warn`: configuration values that were discarded

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
