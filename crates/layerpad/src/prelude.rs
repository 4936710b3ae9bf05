//! Prelude module for Layerpad.
//!
//! ```ignore
//! use layerpad::prelude::*;
//! ```

// ============================================================================
// Context and Configuration
// ============================================================================

pub use crate::{AppContext, LayerpadConfig, LayerpadError, Result};

// ============================================================================
// Signals, Timers and Updates
// ============================================================================

pub use crate::{Signal, TimerId, TimerManager, Updatable};

// ============================================================================
// Surface
// ============================================================================

pub use crate::surface::{MemorySurface, SharedSurface, Surface, SurfaceRect};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{
    AirPump, DragState, DraggableElement, EventDisposition, Geometry, ImageElement, Movable,
    MovableElement, PointerHandler, Positioned, PositionedElement, RawPointerEvent, SwipeGesture,
    SwipeState, Visibility,
};

pub use crate::scene::AirPumpScene;
