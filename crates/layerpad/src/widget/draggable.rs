//! Drag state machine.
//!
//! A [`DraggableElement`] wraps any [`Movable`] widget and lets the pointer
//! pick it up, carry it, and drop it:
//!
//! ```text
//!            down (drag enabled)
//!   Idle ─────────────────────────▶ Dragging { saved_depth }
//!    ▲                                 │  move: recenter on pointer
//!    └──────────── up ─────────────────┘  up:   restore saved depth
//! ```
//!
//! While dragging the widget is raised to the configured lifted depth so it
//! draws above its siblings. Dragging is off until explicitly armed with
//! [`DraggableElement::set_drag_enabled`].

use layerpad_core::logging::targets;
use layerpad_core::{AppContext, Result, Updatable};

use super::element::{Positioned, PositionedElement};
use super::movable::{Movable, MovableElement};
use super::pointer::PointerHandler;
use crate::surface::SharedSurface;

/// Drag state of a [`DraggableElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Carrying the widget; `saved_depth` is restored on release.
    Dragging { saved_depth: i32 },
}

impl DragState {
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// A movable widget that follows the pointer while pressed.
#[derive(Debug)]
pub struct DraggableElement<W = MovableElement> {
    widget: W,
    state: DragState,
    drag_enabled: bool,
}

impl DraggableElement<MovableElement> {
    /// Bind a plain movable element and make it draggable.
    pub fn bind(
        surface: &SharedSurface,
        id: impl Into<String>,
        initial_pos: Option<(i32, i32)>,
        initial_content: Option<&str>,
    ) -> Result<Self> {
        MovableElement::bind(surface, id, initial_pos, initial_content).map(Self::new)
    }
}

impl<W: Movable> DraggableElement<W> {
    /// Wrap an existing movable widget. Dragging starts disabled.
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            state: DragState::Idle,
            drag_enabled: false,
        }
    }

    /// Arm or disarm dragging.
    ///
    /// Disarming does not interrupt a drag already in progress; the next
    /// release still drops the widget.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn into_inner(self) -> W {
        self.widget
    }
}

impl<W: Movable> Positioned for DraggableElement<W> {
    fn element(&self) -> &PositionedElement {
        self.widget.element()
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        self.widget.element_mut()
    }
}

impl<W: Movable> Movable for DraggableElement<W> {}

impl<W: Movable> PointerHandler for DraggableElement<W> {
    fn pointer_id(&self) -> &str {
        self.element().id()
    }

    fn pointer_down(&mut self, ctx: &mut AppContext, x: i32, y: i32) {
        tracing::debug!(target: targets::DRAG, id = %self.pointer_id(), "down [{x},{y}]");
        if !self.drag_enabled || self.state.is_dragging() {
            return;
        }

        let saved_depth = self.depth();
        self.set_depth(ctx.config().lifted_depth);
        self.move_center_to(x, y);
        self.state = DragState::Dragging { saved_depth };
    }

    fn pointer_up(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        tracing::debug!(target: targets::DRAG, id = %self.pointer_id(), "up [{x},{y}]");
        if let DragState::Dragging { saved_depth } = std::mem::take(&mut self.state) {
            self.set_depth(saved_depth);
        }
    }

    fn pointer_move(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        if self.state.is_dragging() {
            self.move_center_to(x, y);
        }
    }
}

impl<W: Movable + Updatable> Updatable for DraggableElement<W> {
    fn update(&mut self, now_ms: u64) {
        self.widget.update(now_ms);
    }
}
