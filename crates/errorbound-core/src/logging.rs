//! Structured logging for boundary classification.
//!
//! Built on the standard [`log`] facade. The boundary emits a small,
//! predictable set of events:
//!
//! - **trace**: an expected failure passed through verbatim; call
//!   arguments captured for a call-aware hook
//! - **debug**: an unclassified failure was intercepted and converted
//!
//! No log implementation is bundled. Applications initialize their
//! preferred backend, e.g.:
//!
//! ```ignore
//! env_logger::init();
//! ```
//!
//! # Log Targets
//!
//! Events use hierarchical targets for filtering:
//!
//! - `errorbound`: root target
//! - `errorbound::boundary`: classification decisions
//! - `errorbound::hook`: conversion hook invocations
//!
//! Example filter: `RUST_LOG=errorbound::boundary=trace`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by boundary classification.
///
/// Use these constants with the `target:` argument to log macros for
/// consistent filtering.
pub mod targets {
    /// Root target for all errorbound logs.
    pub const ERRORBOUND: &str = "errorbound";

    /// Classification decisions (pass-through vs. conversion).
    pub const BOUNDARY: &str = "errorbound::boundary";

    /// Conversion hook invocations.
    pub const HOOK: &str = "errorbound::hook";
}

/// Returns whether logging is enabled at the given level for the given
/// target.
///
/// Useful for conditionally computing expensive diagnostic data:
///
/// ```ignore
/// use errorbound_core::logging::{is_enabled, Level, targets};
///
/// if is_enabled(Level::Trace, targets::HOOK) {
///     trace!(target: targets::HOOK, "state: {:?}", expensive_snapshot());
/// }
/// ```
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}
