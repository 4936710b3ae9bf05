//! Pointer input normalization.
//!
//! Hosts deliver heterogeneous raw input: mouse presses, releases and moves,
//! touch starts, ends and moves, and the native "start dragging content"
//! gesture. [`normalize`] folds all of these into three logical events
//! (down, up, move), each carrying one rounded `(x, y)` pair, and always
//! swallows native drag initiation.
//!
//! Widgets implement [`PointerHandler`] and override the logical callbacks
//! they care about; [`PointerHandler::handle_raw`] does the normalization and
//! dispatch.

use layerpad_core::logging::targets;
use layerpad_core::AppContext;

/// One entry of a touch event's changed-touches list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub identifier: u64,
    pub page_x: f64,
    pub page_y: f64,
}

impl TouchPoint {
    pub fn new(identifier: u64, page_x: f64, page_y: f64) -> Self {
        Self {
            identifier,
            page_x,
            page_y,
        }
    }
}

/// Raw pointer input as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointerEvent {
    MouseDown { page_x: f64, page_y: f64 },
    MouseUp { page_x: f64, page_y: f64 },
    MouseMove { page_x: f64, page_y: f64 },
    TouchStart { changed_touches: Vec<TouchPoint> },
    TouchEnd { changed_touches: Vec<TouchPoint> },
    TouchMove { changed_touches: Vec<TouchPoint> },
    /// The native "start dragging content" gesture.
    DragStart,
}

impl RawPointerEvent {
    pub fn mouse_down(page_x: f64, page_y: f64) -> Self {
        Self::MouseDown { page_x, page_y }
    }

    pub fn mouse_up(page_x: f64, page_y: f64) -> Self {
        Self::MouseUp { page_x, page_y }
    }

    pub fn mouse_move(page_x: f64, page_y: f64) -> Self {
        Self::MouseMove { page_x, page_y }
    }

    /// A touch start with a single changed touch.
    pub fn touch_start(page_x: f64, page_y: f64) -> Self {
        Self::TouchStart {
            changed_touches: vec![TouchPoint::new(0, page_x, page_y)],
        }
    }

    /// A touch end with a single changed touch.
    pub fn touch_end(page_x: f64, page_y: f64) -> Self {
        Self::TouchEnd {
            changed_touches: vec![TouchPoint::new(0, page_x, page_y)],
        }
    }

    /// A touch move with a single changed touch.
    pub fn touch_move(page_x: f64, page_y: f64) -> Self {
        Self::TouchMove {
            changed_touches: vec![TouchPoint::new(0, page_x, page_y)],
        }
    }
}

/// The three logical pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Up,
    Move,
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

/// Result of normalizing a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized {
    /// A logical pointer event to dispatch.
    Pointer(PointerEvent),
    /// Native drag initiation; the host default must be prevented.
    Suppressed,
    /// Nothing to dispatch (a touch event without changed touches).
    Ignored,
}

/// What happened to a raw event after [`PointerHandler::handle_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Dispatched to the logical handler. The host default is prevented.
    Dispatched(PointerKind),
    /// Swallowed without dispatch. The host default is prevented.
    Suppressed,
    /// Not handled.
    Ignored,
}

impl EventDisposition {
    /// Whether the host should prevent its default action.
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
fn round(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Normalize a raw event into a logical one.
///
/// Touch events use the first changed touch; mouse events use their own page
/// coordinates. Both are rounded to the nearest integer.
pub fn normalize(raw: &RawPointerEvent) -> Normalized {
    use RawPointerEvent as Raw;

    let (kind, page_x, page_y) = match raw {
        Raw::MouseDown { page_x, page_y } => (PointerKind::Down, *page_x, *page_y),
        Raw::MouseUp { page_x, page_y } => (PointerKind::Up, *page_x, *page_y),
        Raw::MouseMove { page_x, page_y } => (PointerKind::Move, *page_x, *page_y),
        Raw::TouchStart { changed_touches }
        | Raw::TouchEnd { changed_touches }
        | Raw::TouchMove { changed_touches } => {
            let kind = match raw {
                Raw::TouchStart { .. } => PointerKind::Down,
                Raw::TouchEnd { .. } => PointerKind::Up,
                _ => PointerKind::Move,
            };
            let Some(touch) = changed_touches.first() else {
                tracing::warn!(target: targets::POINTER, ?kind, "touch event without changed touches");
                return Normalized::Ignored;
            };
            (kind, touch.page_x, touch.page_y)
        }
        Raw::DragStart => return Normalized::Suppressed,
    };

    Normalized::Pointer(PointerEvent {
        kind,
        x: round(page_x),
        y: round(page_y),
    })
}

/// A widget that reacts to pointer input.
///
/// The default callbacks only log. Widgets override the ones they need.
pub trait PointerHandler {
    /// Id used in log lines.
    fn pointer_id(&self) -> &str;

    fn pointer_down(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        tracing::debug!(target: targets::POINTER, id = %self.pointer_id(), "pointer_down({x}, {y})");
    }

    fn pointer_up(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        tracing::debug!(target: targets::POINTER, id = %self.pointer_id(), "pointer_up({x}, {y})");
    }

    fn pointer_move(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        tracing::trace!(target: targets::POINTER, id = %self.pointer_id(), "pointer_move({x}, {y})");
    }

    /// Dispatch a logical event to the matching callback.
    fn handle_pointer(&mut self, ctx: &mut AppContext, event: PointerEvent) {
        match event.kind {
            PointerKind::Down => self.pointer_down(ctx, event.x, event.y),
            PointerKind::Up => self.pointer_up(ctx, event.x, event.y),
            PointerKind::Move => self.pointer_move(ctx, event.x, event.y),
        }
    }

    /// Normalize a raw event and dispatch it.
    fn handle_raw(&mut self, ctx: &mut AppContext, raw: &RawPointerEvent) -> EventDisposition {
        match normalize(raw) {
            Normalized::Pointer(event) => {
                self.handle_pointer(ctx, event);
                EventDisposition::Dispatched(event.kind)
            }
            Normalized::Suppressed => EventDisposition::Suppressed,
            Normalized::Ignored => EventDisposition::Ignored,
        }
    }
}
