//! Widgets bound to surface regions.
//!
//! Every widget owns a [`PositionedElement`] and gains behavior by
//! implementing capability traits rather than by extending a base type:
//!
//! - [`Positioned`]: geometry, depth, visibility and hit testing
//! - [`Movable`]: absolute repositioning
//! - [`PointerHandler`]: normalized pointer input
//! - [`Updatable`](layerpad_core::Updatable): the periodic update hook
//!
//! So an image that can also be dragged is simply
//! `DraggableElement<ImageElement>`:
//!
//! ```
//! use layerpad::surface::{MemorySurface, SurfaceRect};
//! use layerpad::widget::{DraggableElement, ImageElement, PointerHandler, Positioned};
//! use layerpad_core::AppContext;
//!
//! let mut surface = MemorySurface::new();
//! surface.add_image_region(
//!     "pic",
//!     SurfaceRect::new(0.0, 0.0, 40.0, 40.0),
//!     SurfaceRect::new(0.0, 0.0, 20.0, 20.0),
//!     "img/pic.png",
//! );
//! let surface = surface.into_shared();
//!
//! let mut ctx = AppContext::default();
//! let mut pic = DraggableElement::new(ImageElement::bind(&surface, "pic").unwrap());
//! pic.set_drag_enabled(true);
//!
//! pic.pointer_down(&mut ctx, 50, 50);
//! assert_eq!(pic.depth(), 1000);
//! pic.pointer_up(&mut ctx, 50, 50);
//! assert_eq!(pic.depth(), 1);
//! ```

mod draggable;
mod element;
mod image;
mod movable;
pub mod pointer;
mod pump;
mod swipe;
#[cfg(feature = "winit")]
pub mod winit_input;

pub use draggable::{DragState, DraggableElement};
pub use element::{DEFAULT_DEPTH, Geometry, Positioned, PositionedElement, Visibility};
pub use image::{ImageElement, ImageSource};
pub use movable::{Movable, MovableElement};
pub use pointer::{
    EventDisposition, Normalized, PointerEvent, PointerHandler, PointerKind, RawPointerEvent,
    TouchPoint, normalize,
};
pub use pump::AirPump;
pub use swipe::{SharedRegion, SwipeGesture, SwipeRegions, SwipeState};
