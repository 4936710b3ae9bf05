//! Core systems for Layerpad.
//!
//! This crate provides the host-agnostic runtime pieces that Layerpad widgets
//! build on:
//!
//! - **Application context**: explicitly constructed shared state for a surface
//! - **Timers**: one-shot and repeating timers driven by the host clock
//! - **Periodic updates**: a registry of widgets ticked by the host
//! - **Signals**: observer notifications such as "swipe completed"
//! - **Configuration**: TOML-backed settings with defaults
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use layerpad_core::{AppContext, LayerpadConfig};
//!
//! let mut ctx = AppContext::new(LayerpadConfig::default());
//! let timer = ctx.timers_mut().start_repeating(Duration::from_millis(300));
//!
//! // The host tick source drives the context.
//! assert!(ctx.tick(100).is_empty());
//! assert_eq!(ctx.tick(300), vec![timer]);
//! ```

pub mod config;
mod context;
mod error;
pub mod logging;
pub mod signal;
mod timer;
pub mod update;

pub use config::{LayerpadConfig, PumpConfig, RegionIds};
pub use context::AppContext;
pub use error::{ConfigError, LayerpadError, Result, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
pub use update::{LapTracker, PeriodicUpdateRegistry, Updatable};
