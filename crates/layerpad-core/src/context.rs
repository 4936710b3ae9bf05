//! Application context.
//!
//! [`AppContext`] owns the state that is shared by every widget of a running
//! surface: the timer manager, the periodic update registry, the swipe counter
//! and the configuration. It is created explicitly by the host, passed by
//! reference to whichever widget needs it, and torn down with
//! [`AppContext::shutdown`].

use crate::config::LayerpadConfig;
use crate::timer::{TimerId, TimerManager};
use crate::update::{LapTracker, PeriodicUpdateRegistry};

/// Shared runtime state for one surface.
#[derive(Debug)]
pub struct AppContext {
    config: LayerpadConfig,
    timers: TimerManager,
    updates: PeriodicUpdateRegistry,
    swipe_count: u32,
    lap: LapTracker,
}

impl AppContext {
    /// Create a context with the given configuration.
    pub fn new(config: LayerpadConfig) -> Self {
        let lap = LapTracker::new("tick", config.lap_log_interval_ms);
        Self {
            config,
            timers: TimerManager::new(),
            updates: PeriodicUpdateRegistry::new(),
            swipe_count: 0,
            lap,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &LayerpadConfig {
        &self.config
    }

    /// The timer manager.
    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    /// Mutable access to the timer manager.
    pub fn timers_mut(&mut self) -> &mut TimerManager {
        &mut self.timers
    }

    /// The periodic update registry.
    pub fn updates(&self) -> &PeriodicUpdateRegistry {
        &self.updates
    }

    /// Mutable access to the periodic update registry.
    pub fn updates_mut(&mut self) -> &mut PeriodicUpdateRegistry {
        &mut self.updates
    }

    /// Number of completed swipes so far.
    pub fn swipe_count(&self) -> u32 {
        self.swipe_count
    }

    /// Record a completed swipe and return the new count.
    pub fn record_swipe(&mut self) -> u32 {
        self.swipe_count = self.swipe_count.saturating_add(1);
        self.swipe_count
    }

    /// Drive one host tick.
    ///
    /// Advances the timer clock, runs every registered update hook, and
    /// returns the timers that fired so the caller can route them to their
    /// owners.
    pub fn tick(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.lap.record(now_ms);
        let fired = self.timers.advance_to(now_ms);
        self.updates.tick(now_ms);
        fired
    }

    /// Stop every timer and reset the counter.
    ///
    /// The registry is replaced with an empty one; widgets themselves are
    /// owned elsewhere and are unaffected.
    pub fn shutdown(&mut self) {
        crate::layerpad_debug!(
            active_timers = self.timers.active_count(),
            registered = self.updates.len(),
            "shutting down context"
        );
        self.timers = TimerManager::new();
        self.updates = PeriodicUpdateRegistry::new();
        self.swipe_count = 0;
        self.lap = LapTracker::new("tick", self.config.lap_log_interval_ms);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(LayerpadConfig::default())
    }
}
