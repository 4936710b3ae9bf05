//! Conversion of winit window events into [`RawPointerEvent`]s.
//!
//! winit reports mouse buttons without a position, so the adapter remembers
//! the last cursor position and stamps it onto presses and releases. Only
//! the left button is tracked.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

use super::pointer::{RawPointerEvent, TouchPoint};

/// Stateful winit-to-pointer converter for a single window.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinitPointerAdapter {
    cursor: PhysicalPosition<f64>,
}

impl WinitPointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> (f64, f64) {
        (self.cursor.x, self.cursor.y)
    }

    /// Convert a window event. Returns `None` for events that are not
    /// pointer input.
    pub fn convert(&mut self, event: &WindowEvent) -> Option<RawPointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = *position;
                Some(RawPointerEvent::mouse_move(position.x, position.y))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(self.button_event(*state)),
            WindowEvent::Touch(touch) => Some(touch_event(
                touch.phase,
                touch.id,
                touch.location.x,
                touch.location.y,
            )),
            _ => None,
        }
    }

    /// A left-button press or release at the last cursor position.
    pub fn button_event(&self, state: ElementState) -> RawPointerEvent {
        let PhysicalPosition { x, y } = self.cursor;
        match state {
            ElementState::Pressed => RawPointerEvent::mouse_down(x, y),
            ElementState::Released => RawPointerEvent::mouse_up(x, y),
        }
    }

    /// Record a cursor position without producing an event.
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = PhysicalPosition::new(x, y);
    }
}

/// Build the touch event for one winit touch phase.
///
/// A cancelled touch is reported as an end so that in-progress gestures
/// release.
pub fn touch_event(phase: TouchPhase, id: u64, x: f64, y: f64) -> RawPointerEvent {
    let changed_touches = vec![TouchPoint::new(id, x, y)];
    match phase {
        TouchPhase::Started => RawPointerEvent::TouchStart { changed_touches },
        TouchPhase::Moved => RawPointerEvent::TouchMove { changed_touches },
        TouchPhase::Ended | TouchPhase::Cancelled => RawPointerEvent::TouchEnd { changed_touches },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::pointer::{Normalized, PointerEvent, PointerKind, normalize};

    #[test]
    fn test_button_uses_last_cursor() {
        let mut adapter = WinitPointerAdapter::new();
        adapter.set_cursor(12.4, 30.6);

        assert_eq!(
            adapter.button_event(ElementState::Pressed),
            RawPointerEvent::mouse_down(12.4, 30.6)
        );
        assert_eq!(
            adapter.button_event(ElementState::Released),
            RawPointerEvent::mouse_up(12.4, 30.6)
        );
    }

    #[test]
    fn test_touch_phases() {
        let start = touch_event(TouchPhase::Started, 7, 1.0, 2.0);
        assert_eq!(
            normalize(&start),
            Normalized::Pointer(PointerEvent {
                kind: PointerKind::Down,
                x: 1,
                y: 2
            })
        );

        let cancelled = touch_event(TouchPhase::Cancelled, 7, 1.0, 2.0);
        assert!(matches!(cancelled, RawPointerEvent::TouchEnd { .. }));

        let moved = touch_event(TouchPhase::Moved, 7, 3.0, 4.0);
        assert!(matches!(moved, RawPointerEvent::TouchMove { ref changed_touches } if changed_touches[0].identifier == 7));
    }
}
