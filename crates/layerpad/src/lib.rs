//! Layerpad - layered, pointer-driven widgets.
//!
//! This is the main crate. It re-exports everything from `layerpad_core` and
//! adds the surface binding, the widget capabilities and the air pump scene.
//!
//! # Example
//!
//! ```
//! use layerpad::prelude::*;
//! use layerpad::surface::{MemorySurface, SurfaceRect};
//!
//! let mut surface = MemorySurface::new();
//! for (id, y) in [("swipe_top", 0.0), ("swipe_area", 10.0), ("swipe_bottom", 20.0)] {
//!     let rect = SurfaceRect::new(0.0, y, 10.0, 10.0);
//!     surface.add_image_region(id, rect, rect, format!("img/{id}.png"));
//! }
//! let pump = SurfaceRect::new(100.0, 0.0, 50.0, 50.0);
//! surface
//!     .add_image_region("air_pump", pump, pump, "img/AirPump1.png")
//!     .add_region("swipe_count", SurfaceRect::new(200.0, 0.0, 20.0, 20.0));
//!
//! let mut scene = AirPumpScene::bind(surface.into_shared(), LayerpadConfig::default())?;
//! scene.dispatch("swipe_top", &RawPointerEvent::mouse_down(5.0, 5.0));
//! scene.dispatch("swipe_area", &RawPointerEvent::mouse_move(5.0, 15.0));
//! scene.dispatch("swipe_bottom", &RawPointerEvent::mouse_move(5.0, 25.0));
//!
//! assert_eq!(scene.swipe_count(), 1);
//! assert_eq!(scene.counter_text().as_deref(), Some("1"));
//! # Ok::<(), layerpad::LayerpadError>(())
//! ```

pub use layerpad_core::*;

pub mod prelude;
pub mod scene;
pub mod surface;
pub mod widget;

pub use scene::AirPumpScene;
