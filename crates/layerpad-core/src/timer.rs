//! Timer system for Layerpad.
//!
//! Provides one-shot and repeating timers driven by the host clock. The host
//! calls [`TimerManager::advance_to`] with the current time in milliseconds
//! and receives the IDs of every timer that fired, in fire-time order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire, in host milliseconds.
    next_fire: u64,
    /// The interval for repeating timers, never zero.
    interval: u64,
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then by insertion).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: u64,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Manages all timers for an application context.
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
    now_ms: u64,
    next_seq: u64,
}

impl TimerManager {
    /// Create a new timer manager whose clock starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last time reported by the host, in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a one-shot timer that fires after the specified duration.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.insert(duration_ms(duration), TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval`. A zero interval is treated as
    /// one millisecond.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.insert(duration_ms(interval), TimerKind::Repeating)
    }

    fn insert(&mut self, delay: u64, kind: TimerKind) -> TimerId {
        let interval = delay.max(1);
        let next_fire = self.now_ms.saturating_add(delay);
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.push_entry(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?kind, next_fire, "timer started");
        id
    }

    fn push_entry(&mut self, id: TimerId, fire_time: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(TimerQueueEntry { id, fire_time, seq });
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId),
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Get the time until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        while let Some(entry) = self.queue.peek() {
            if self.is_current(entry) {
                break;
            }
            self.queue.pop();
        }

        self.queue
            .peek()
            .map(|entry| Duration::from_millis(entry.fire_time.saturating_sub(self.now_ms)))
    }

    fn is_current(&self, entry: &TimerQueueEntry) -> bool {
        self.timers
            .get(entry.id)
            .is_some_and(|t| t.next_fire == entry.fire_time)
    }

    /// Advance the clock to `now_ms` and collect every timer that fired.
    ///
    /// The clock never moves backwards. Repeating timers are rescheduled
    /// one interval after `now_ms`, so a late host tick fires each timer at
    /// most once.
    #[tracing::instrument(skip(self), target = "layerpad_core::timer", level = "trace")]
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            if !self.is_current(&entry) {
                continue;
            }
            let Some(timer) = self.timers.get_mut(entry.id) else {
                continue;
            };

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push(entry.id);

            if timer.kind == TimerKind::OneShot {
                self.timers.remove(entry.id);
            } else {
                timer.next_fire = now.saturating_add(timer.interval);
                let next_fire = timer.next_fire;
                self.push_entry(entry.id, next_fire);
            }
        }

        fired
    }
}
