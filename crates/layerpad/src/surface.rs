//! Render-surface binding.
//!
//! Widgets bind to pre-existing, named regions of a host surface (a DOM, a
//! compositor scene, a test double). The contract is small: geometry, depth
//! and content are read once when a widget binds, and every later mutation
//! is written through to the surface.
//!
//! [`MemorySurface`] is a complete in-memory implementation used by tests and
//! the demo.

use std::collections::HashMap;
use std::sync::Arc;

use layerpad_core::logging::targets;
use parking_lot::Mutex;

/// A surface region shared by every widget bound to it.
pub type SharedSurface = Arc<Mutex<dyn Surface + Send>>;

/// An axis-aligned rectangle in surface (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The image child of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    /// Bounds of the image itself, which may be smaller than its container.
    pub bounds: SurfaceRect,
    /// The image resource locator.
    pub source: String,
}

/// What a widget reads from its region when it binds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSnapshot {
    pub bounds: SurfaceRect,
    /// Explicit depth, if the region has one.
    pub depth: Option<i32>,
    /// Rendered text content, if any.
    pub content: Option<String>,
    /// Inner image node, if the region wraps an image.
    pub image: Option<ImageNode>,
}

/// The host rendering surface.
///
/// Writes to an unknown id are ignored by implementations; widgets only ever
/// write to ids they successfully bound.
pub trait Surface {
    /// Read the current state of a region.
    fn region(&self, id: &str) -> Option<RegionSnapshot>;

    /// Replace the rendered content of a region.
    fn set_content(&mut self, id: &str, content: &str);

    /// Set the stacking depth of a region.
    fn set_depth(&mut self, id: &str, depth: i32);

    /// Set the opacity of a region (0.0 or 1.0 in practice).
    fn set_opacity(&mut self, id: &str, opacity: f32);

    /// Switch a region to absolute positioning.
    fn set_absolute(&mut self, id: &str);

    /// Move an absolutely positioned region.
    fn set_position(&mut self, id: &str, x: i32, y: i32);

    /// Point a region's image node at a new resource.
    fn set_image_source(&mut self, id: &str, source: &str);
}

#[derive(Debug, Clone, PartialEq)]
struct MemoryRegion {
    snapshot: RegionSnapshot,
    opacity: f32,
    absolute: bool,
}

/// An in-memory [`Surface`].
///
/// # Example
///
/// ```
/// use layerpad::surface::{MemorySurface, Surface, SurfaceRect};
///
/// let mut surface = MemorySurface::new();
/// surface.add_region("box", SurfaceRect::new(10.0, 10.0, 20.0, 20.0));
/// surface.set_depth("box", 3);
/// assert_eq!(surface.region("box").unwrap().depth, Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    regions: HashMap<String, MemoryRegion>,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this surface for sharing between widgets.
    pub fn into_shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    /// Add (or replace) a plain region.
    pub fn add_region(&mut self, id: impl Into<String>, bounds: SurfaceRect) -> &mut Self {
        self.regions.insert(
            id.into(),
            MemoryRegion {
                snapshot: RegionSnapshot {
                    bounds,
                    ..Default::default()
                },
                opacity: 1.0,
                absolute: false,
            },
        );
        self
    }

    /// Add (or replace) a region that wraps an image.
    pub fn add_image_region(
        &mut self,
        id: impl Into<String>,
        bounds: SurfaceRect,
        image_bounds: SurfaceRect,
        source: impl Into<String>,
    ) -> &mut Self {
        let id = id.into();
        self.add_region(id.clone(), bounds);
        if let Some(region) = self.regions.get_mut(&id) {
            region.snapshot.image = Some(ImageNode {
                bounds: image_bounds,
                source: source.into(),
            });
        }
        self
    }

    /// Builder-style setter for the initial depth of an existing region.
    pub fn with_depth(&mut self, id: &str, depth: i32) -> &mut Self {
        self.set_depth(id, depth);
        self
    }

    /// Builder-style setter for the initial content of an existing region.
    pub fn with_content(&mut self, id: &str, content: &str) -> &mut Self {
        self.set_content(id, content);
        self
    }

    /// Current depth of a region.
    pub fn depth(&self, id: &str) -> Option<i32> {
        self.regions.get(id).and_then(|r| r.snapshot.depth)
    }

    /// Current opacity of a region.
    pub fn opacity(&self, id: &str) -> Option<f32> {
        self.regions.get(id).map(|r| r.opacity)
    }

    /// Current content of a region.
    pub fn content(&self, id: &str) -> Option<&str> {
        self.regions
            .get(id)
            .and_then(|r| r.snapshot.content.as_deref())
    }

    /// Current image locator of a region.
    pub fn image_source(&self, id: &str) -> Option<&str> {
        self.regions
            .get(id)
            .and_then(|r| r.snapshot.image.as_ref())
            .map(|img| img.source.as_str())
    }

    /// Current origin of a region.
    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.regions
            .get(id)
            .map(|r| (r.snapshot.bounds.x, r.snapshot.bounds.y))
    }

    /// Current origin of a region's image node.
    pub fn image_position(&self, id: &str) -> Option<(f64, f64)> {
        self.regions
            .get(id)
            .and_then(|r| r.snapshot.image.as_ref())
            .map(|img| (img.bounds.x, img.bounds.y))
    }

    /// Whether a region has been switched to absolute positioning.
    pub fn is_absolute(&self, id: &str) -> bool {
        self.regions.get(id).is_some_and(|r| r.absolute)
    }

    fn region_mut(&mut self, id: &str) -> Option<&mut MemoryRegion> {
        let region = self.regions.get_mut(id);
        if region.is_none() {
            tracing::warn!(target: targets::WIDGET, %id, "write to unknown surface region");
        }
        region
    }
}

impl Surface for MemorySurface {
    fn region(&self, id: &str) -> Option<RegionSnapshot> {
        self.regions.get(id).map(|r| r.snapshot.clone())
    }

    fn set_content(&mut self, id: &str, content: &str) {
        if let Some(region) = self.region_mut(id) {
            region.snapshot.content = Some(content.to_string());
        }
    }

    fn set_depth(&mut self, id: &str, depth: i32) {
        if let Some(region) = self.region_mut(id) {
            region.snapshot.depth = Some(depth);
        }
    }

    fn set_opacity(&mut self, id: &str, opacity: f32) {
        if let Some(region) = self.region_mut(id) {
            region.opacity = opacity;
        }
    }

    fn set_absolute(&mut self, id: &str) {
        if let Some(region) = self.region_mut(id) {
            region.absolute = true;
        }
    }

    fn set_position(&mut self, id: &str, x: i32, y: i32) {
        if let Some(region) = self.region_mut(id) {
            let bounds = &mut region.snapshot.bounds;
            let (dx, dy) = (f64::from(x) - bounds.x, f64::from(y) - bounds.y);
            bounds.x = f64::from(x);
            bounds.y = f64::from(y);
            // The image moves with its container.
            if let Some(image) = region.snapshot.image.as_mut() {
                image.bounds.x += dx;
                image.bounds.y += dy;
            }
        }
    }

    fn set_image_source(&mut self, id: &str, source: &str) {
        if let Some(image) = self
            .region_mut(id)
            .and_then(|r| r.snapshot.image.as_mut())
        {
            image.source = source.to_string();
        }
    }
}
