//! Periodic update registry.
//!
//! Widgets that want to poll elapsed time opt in through
//! [`PeriodicUpdateRegistry::register`] instead of owning a timer each. The
//! host tick source drives [`PeriodicUpdateRegistry::tick`], which calls
//! [`Updatable::update`] on every member in registration order.
//!
//! The registry holds weak references: it never keeps a widget alive, and a
//! dropped widget is simply skipped. There is no removal API.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::logging::targets;

/// A widget that receives periodic ticks.
pub trait Updatable {
    /// Called once per registry tick with the host time in milliseconds.
    fn update(&mut self, now_ms: u64);
}

struct Member {
    label: String,
    widget: Weak<Mutex<dyn Updatable + Send>>,
}

/// Ordered set of widgets opted into periodic ticking.
///
/// Membership is keyed by widget identity (the shared allocation), so
/// registering the same widget twice leaves exactly one entry whatever label
/// it is registered under. Labels only appear in logs.
#[derive(Default)]
pub struct PeriodicUpdateRegistry {
    members: Vec<Member>,
}

impl PeriodicUpdateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget if it is not already a member.
    ///
    /// Returns `true` if the widget was added.
    pub fn register<W>(&mut self, label: impl Into<String>, widget: &Arc<Mutex<W>>) -> bool
    where
        W: Updatable + Send + 'static,
    {
        let label = label.into();
        if self.contains(widget) {
            tracing::trace!(target: targets::UPDATE, %label, "already registered");
            return false;
        }

        let weak = Arc::downgrade(widget);
        let weak: Weak<Mutex<dyn Updatable + Send>> = weak;
        tracing::debug!(target: targets::UPDATE, %label, "registered for periodic updates");
        self.members.push(Member { label, widget: weak });
        true
    }

    /// Whether this widget is registered.
    ///
    /// Members hold a `Weak`, which keeps the allocation (not the widget)
    /// alive, so a stored address is never reused by another widget.
    pub fn contains<W: ?Sized>(&self, widget: &Arc<Mutex<W>>) -> bool {
        let addr = Arc::as_ptr(widget);
        self.members
            .iter()
            .any(|m| std::ptr::addr_eq(m.widget.as_ptr(), addr))
    }

    /// Number of registered widgets, including ones already dropped.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the registry has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Invoke every live member's update hook with `now_ms`.
    ///
    /// Returns the number of widgets that were updated.
    pub fn tick(&self, now_ms: u64) -> usize {
        let mut updated = 0;
        for member in &self.members {
            let Some(widget) = member.widget.upgrade() else {
                tracing::trace!(target: targets::UPDATE, label = %member.label, "skipping dropped widget");
                continue;
            };
            widget.lock().update(now_ms);
            updated += 1;
        }
        updated
    }
}

impl std::fmt::Debug for PeriodicUpdateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.members.iter().map(|m| &m.label))
            .finish()
    }
}

/// Tracks update timestamps and logs a lap line once per interval.
///
/// This is the default bookkeeping behind a widget's update hook: it keeps the
/// previous tick time and emits a debug line whenever at least `interval_ms`
/// has passed since the last lap.
#[derive(Debug, Clone)]
pub struct LapTracker {
    label: String,
    interval_ms: u64,
    prev_lap_ms: u64,
    prev_ms: u64,
}

impl LapTracker {
    /// Create a tracker that laps every `interval_ms`.
    pub fn new(label: impl Into<String>, interval_ms: u64) -> Self {
        Self {
            label: label.into(),
            interval_ms,
            prev_lap_ms: 0,
            prev_ms: 0,
        }
    }

    /// Record a tick. Returns `true` if a lap was completed (and logged).
    pub fn record(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.prev_lap_ms);
        let lapped = elapsed >= self.interval_ms;
        if lapped {
            tracing::debug!(
                target: targets::UPDATE,
                label = %self.label,
                now_secs = now_ms as f64 / 1000.0,
                elapsed_ms = elapsed,
                "lap"
            );
            self.prev_lap_ms = now_ms;
        }
        self.prev_ms = now_ms;
        lapped
    }

    /// Time of the most recent tick.
    pub fn prev_ms(&self) -> u64 {
        self.prev_ms
    }

    /// Minimum time between two laps.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time of the most recent lap.
    pub fn prev_lap_ms(&self) -> u64 {
        self.prev_lap_ms
    }
}
