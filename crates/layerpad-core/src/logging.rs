//! Logging facilities for Layerpad.
//!
//! Layerpad uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Bind the scene, feed pointer events, tick...
//! }
//! ```
//!
//! Widgets log their bound geometry at `debug`, state machine transitions at
//! `trace`/`debug`, swipe completions at `info` and anomalies at `warn`.

/// Span names used throughout Layerpad for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Scene tick processing span.
    pub const TICK: &str = "layerpad::tick";
    /// Pointer dispatch span.
    pub const POINTER: &str = "layerpad::pointer";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "layerpad_core";
    /// Timer system target.
    pub const TIMER: &str = "layerpad_core::timer";
    /// Periodic update registry target.
    pub const UPDATE: &str = "layerpad_core::update";
    /// Signal system target.
    pub const SIGNAL: &str = "layerpad_core::signal";
    /// Widget binding and mutation target.
    pub const WIDGET: &str = "layerpad::widget";
    /// Pointer normalization and dispatch target.
    pub const POINTER: &str = "layerpad::pointer";
    /// Drag state machine target.
    pub const DRAG: &str = "layerpad::drag";
    /// Swipe state machine target.
    pub const SWIPE: &str = "layerpad::swipe";
    /// Performance span target.
    pub const PERF: &str = "layerpad::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of a tick or a dispatch.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Debug event under the core target.
#[macro_export]
macro_rules! layerpad_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
