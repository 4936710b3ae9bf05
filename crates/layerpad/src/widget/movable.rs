//! Absolute repositioning.

use layerpad_core::{Result, Updatable};

use super::element::{Positioned, PositionedElement};
use super::pointer::PointerHandler;
use crate::surface::SharedSurface;

/// Capability to move a positioned widget to absolute coordinates.
///
/// Coordinates are optional: if either one is `None` the move is a no-op.
/// Plain `i32` arguments convert automatically.
pub trait Movable: Positioned {
    /// Move the top-left corner to `(x, y)`.
    fn move_to(&mut self, x: impl Into<Option<i32>>, y: impl Into<Option<i32>>) {
        let (Some(x), Some(y)) = (x.into(), y.into()) else {
            return;
        };
        self.element_mut().set_origin(x, y);
    }

    /// Move so that the widget's center lands on `(x, y)`.
    fn move_center_to(&mut self, x: impl Into<Option<i32>>, y: impl Into<Option<i32>>) {
        let (Some(x), Some(y)) = (x.into(), y.into()) else {
            return;
        };
        let (left, top) = self.geometry().origin_for_center(x, y);
        self.move_to(left, top);
    }
}

/// A positioned element that can be moved.
#[derive(Debug)]
pub struct MovableElement {
    element: PositionedElement,
}

impl MovableElement {
    /// Bind to a region, switch it to absolute positioning and apply the
    /// optional initial position.
    pub fn bind(
        surface: &SharedSurface,
        id: impl Into<String>,
        initial_pos: Option<(i32, i32)>,
        initial_content: Option<&str>,
    ) -> Result<Self> {
        let element = PositionedElement::bind(surface, id, initial_content)?;
        surface.lock().set_absolute(element.id());

        let mut movable = Self { element };
        if let Some((x, y)) = initial_pos {
            movable.move_to(x, y);
        }
        Ok(movable)
    }

    pub fn into_element(self) -> PositionedElement {
        self.element
    }
}

impl Positioned for MovableElement {
    fn element(&self) -> &PositionedElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        &mut self.element
    }
}

impl Movable for MovableElement {}

impl PointerHandler for MovableElement {
    fn pointer_id(&self) -> &str {
        self.element.id()
    }
}

impl Updatable for MovableElement {
    fn update(&mut self, now_ms: u64) {
        self.element.update(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::surface::{MemorySurface, SurfaceRect};

    fn setup() -> (Arc<Mutex<MemorySurface>>, SharedSurface) {
        let mut surface = MemorySurface::new();
        surface.add_region("ball", SurfaceRect::new(0.0, 0.0, 20.0, 10.0));
        let surface = Arc::new(Mutex::new(surface));
        let shared: SharedSurface = surface.clone();
        (surface, shared)
    }

    #[test]
    fn test_bind_sets_absolute_and_initial_position() {
        let (surface, shared) = setup();
        let ball = MovableElement::bind(&shared, "ball", Some((5, 6)), None).unwrap();

        assert!(surface.lock().is_absolute("ball"));
        assert_eq!(ball.geometry().x(), 5);
        assert_eq!(ball.geometry().y(), 6);
        assert_eq!(surface.lock().position("ball"), Some((5.0, 6.0)));
    }

    #[test]
    fn test_move_to_updates_derived_edges() {
        let (_, shared) = setup();
        let mut ball = MovableElement::bind(&shared, "ball", None, None).unwrap();

        ball.move_to(100, 50);
        assert_eq!(ball.geometry().right(), 120);
        assert_eq!(ball.geometry().bottom(), 60);
    }

    #[test]
    fn test_move_with_missing_coordinate_is_noop() {
        let (surface, shared) = setup();
        let mut ball = MovableElement::bind(&shared, "ball", Some((1, 2)), None).unwrap();

        ball.move_to(None, 40);
        ball.move_to(40, None);
        ball.move_center_to(None, None);

        assert_eq!((ball.geometry().x(), ball.geometry().y()), (1, 2));
        assert_eq!(surface.lock().position("ball"), Some((1.0, 2.0)));
    }

    #[test]
    fn test_move_center_to() {
        let (_, shared) = setup();
        let mut ball = MovableElement::bind(&shared, "ball", None, None).unwrap();

        ball.move_center_to(50, 50);
        assert_eq!((ball.geometry().x(), ball.geometry().y()), (40, 45));
    }
}
