//! Positioned element: the attribute model shared by every widget.
//!
//! A [`PositionedElement`] binds to a named surface region and keeps its
//! geometry, depth, visibility and text content, mirroring every mutation back
//! to the surface.

use layerpad_core::config::DEFAULT_LAP_LOG_INTERVAL_MS;
use layerpad_core::logging::targets;
use layerpad_core::{LapTracker, LayerpadError, Result, Updatable};

use crate::surface::{SharedSurface, SurfaceRect};

/// Depth a region gets when the surface reports none.
pub const DEFAULT_DEPTH: i32 = 1;

fn extent(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Integer pixel geometry.
///
/// `right` and `bottom` are derived from the origin and size, so they can
/// never disagree with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Geometry {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Geometry {
    /// Create a geometry from origin and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Floor a surface rectangle to integer pixels.
    ///
    /// Negative sizes are clamped to zero.
    pub fn from_surface_rect(rect: SurfaceRect) -> Self {
        Self {
            x: rect.x.floor() as i32,
            y: rect.y.floor() as i32,
            width: rect.width.max(0.0).floor() as u32,
            height: rect.height.max(0.0).floor() as u32,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `x + width`.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(extent(self.width))
    }

    /// `y + height`.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(extent(self.height))
    }

    /// Move the origin, keeping the size.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Change the size, keeping the origin.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Top-left corner that would center this geometry on `(cx, cy)`.
    ///
    /// Half sizes are truncated, so odd sizes place the extra pixel on the
    /// right/bottom side.
    pub fn origin_for_center(&self, cx: i32, cy: i32) -> (i32, i32) {
        (
            cx.saturating_sub(extent(self.width / 2)),
            cy.saturating_sub(extent(self.height / 2)),
        )
    }

    /// Whether `(x, y)` lies inside, counting all four edges as inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Whether a widget is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Opacity 1.
    #[default]
    Visible,
    /// Opacity 0. Hidden widgets still answer hit tests.
    Hidden,
}

impl Visibility {
    /// The surface opacity for this visibility.
    pub fn opacity(self) -> f32 {
        match self {
            Self::Visible => 1.0,
            Self::Hidden => 0.0,
        }
    }
}

/// A widget bound to a surface region.
///
/// # Example
///
/// ```
/// use layerpad::surface::{MemorySurface, SurfaceRect};
/// use layerpad::widget::PositionedElement;
///
/// let mut surface = MemorySurface::new();
/// surface.add_region("count", SurfaceRect::new(10.0, 10.0, 20.0, 20.0));
/// let surface = surface.into_shared();
///
/// let mut count = PositionedElement::bind(&surface, "count", Some("0")).unwrap();
/// assert!(count.hit_test(30, 30));
/// count.set_content(" 1 ");
/// assert_eq!(count.content(), Some("1"));
/// ```
pub struct PositionedElement {
    id: String,
    surface: SharedSurface,
    geometry: Geometry,
    depth: i32,
    visibility: Visibility,
    content: Option<String>,
    /// Origin of `geometry` relative to the surface region's own origin.
    inset: (i32, i32),
    lap: LapTracker,
}

impl PositionedElement {
    /// Bind to an existing surface region.
    ///
    /// Reads the region's geometry and depth; a region without a depth gets
    /// [`DEFAULT_DEPTH`], which is written back to the surface. With
    /// `initial_content` the region's content is replaced, otherwise its
    /// existing content is captured.
    ///
    /// # Errors
    ///
    /// Returns [`LayerpadError::MissingRegion`] if the surface has no region
    /// named `id`.
    pub fn bind(
        surface: &SharedSurface,
        id: impl Into<String>,
        initial_content: Option<&str>,
    ) -> Result<Self> {
        let id = id.into();
        let snapshot = surface
            .lock()
            .region(&id)
            .ok_or_else(|| LayerpadError::missing_region(&id))?;

        let mut element = Self {
            lap: LapTracker::new(id.clone(), DEFAULT_LAP_LOG_INTERVAL_MS),
            id,
            surface: surface.clone(),
            geometry: Geometry::from_surface_rect(snapshot.bounds),
            depth: snapshot.depth.unwrap_or(DEFAULT_DEPTH),
            visibility: Visibility::Visible,
            content: None,
            inset: (0, 0),
        };

        if snapshot.depth.is_none() {
            element.set_depth(DEFAULT_DEPTH);
        }

        match initial_content {
            Some(text) => element.set_content(text),
            None => {
                element.content = snapshot
                    .content
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
            }
        }

        let g = element.geometry;
        tracing::debug!(
            target: targets::WIDGET,
            "id={}, [{},{}],[{},{}],{}x{},z={}",
            element.id,
            g.x(),
            g.y(),
            g.right(),
            g.bottom(),
            g.width(),
            g.height(),
            element.depth
        );

        Ok(element)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The surface region id this element is bound to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The surface this element writes to.
    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// The trimmed text content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the geometry without touching the surface.
    ///
    /// Used when the interactive bounds differ from the region's own bounds,
    /// e.g. an image smaller than its container. The offset between the two
    /// origins is kept so that moves place the new geometry, not the region.
    pub(crate) fn rebase_geometry(&mut self, geometry: Geometry) {
        let (rx, ry) = self.region_origin();
        self.inset = (geometry.x().saturating_sub(rx), geometry.y().saturating_sub(ry));
        self.geometry = geometry;
    }

    fn region_origin(&self) -> (i32, i32) {
        (
            self.geometry.x().saturating_sub(self.inset.0),
            self.geometry.y().saturating_sub(self.inset.1),
        )
    }

    /// Move to an absolute origin and mirror it to the surface.
    ///
    /// The surface region is positioned so that the geometry, not the region
    /// itself, lands on `(x, y)`.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.geometry.set_origin(x, y);
        let (rx, ry) = self.region_origin();
        self.surface.lock().set_position(&self.id, rx, ry);
    }

    /// Trim and store text content, mirroring it to the surface.
    pub fn set_content(&mut self, text: &str) {
        let text = text.trim();
        self.surface.lock().set_content(&self.id, text);
        self.content = Some(text.to_string());
    }

    /// Set the stacking depth.
    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
        self.surface.lock().set_depth(&self.id, depth);
    }

    /// Make the element visible at `depth`.
    pub fn show(&mut self, depth: i32) {
        self.set_visibility(Visibility::Visible);
        self.set_depth(depth);
    }

    /// Make the element visible at [`DEFAULT_DEPTH`].
    pub fn show_default(&mut self) {
        self.show(DEFAULT_DEPTH);
    }

    /// Hide the element and drop it to depth 0.
    pub fn hide(&mut self) {
        self.set_visibility(Visibility::Hidden);
        self.set_depth(0);
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.surface
            .lock()
            .set_opacity(&self.id, visibility.opacity());
    }

    /// Inclusive hit test against the current geometry.
    ///
    /// Visibility is not considered.
    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        let hit = self.geometry.contains(x, y);
        if hit {
            tracing::trace!(target: targets::WIDGET, id = %self.id, x, y, "hit");
        }
        hit
    }

    /// Change how often the default update hook logs a lap.
    pub fn set_lap_interval(&mut self, interval_ms: u64) {
        self.lap = LapTracker::new(self.id.clone(), interval_ms);
    }

    /// Current lap log interval.
    pub fn lap_interval_ms(&self) -> u64 {
        self.lap.interval_ms()
    }

    /// Time of the most recent periodic update.
    pub fn last_update_ms(&self) -> u64 {
        self.lap.prev_ms()
    }
}

impl Updatable for PositionedElement {
    fn update(&mut self, now_ms: u64) {
        self.lap.record(now_ms);
    }
}

impl std::fmt::Debug for PositionedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionedElement")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("depth", &self.depth)
            .field("visibility", &self.visibility)
            .field("content", &self.content)
            .field("inset", &self.inset)
            .finish()
    }
}

/// Capability of every widget that owns a [`PositionedElement`].
///
/// Composite widgets implement the two accessors and get the attribute model
/// for free.
pub trait Positioned {
    fn element(&self) -> &PositionedElement;

    fn element_mut(&mut self) -> &mut PositionedElement;

    fn geometry(&self) -> Geometry {
        self.element().geometry()
    }

    fn depth(&self) -> i32 {
        self.element().depth()
    }

    fn set_depth(&mut self, depth: i32) {
        self.element_mut().set_depth(depth);
    }

    fn hit_test(&self, x: i32, y: i32) -> bool {
        self.element().hit_test(x, y)
    }

    fn show(&mut self, depth: i32) {
        self.element_mut().show(depth);
    }

    fn hide(&mut self) {
        self.element_mut().hide();
    }
}

impl Positioned for PositionedElement {
    fn element(&self) -> &PositionedElement {
        self
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        self
    }
}

static_assertions::assert_impl_all!(PositionedElement: Send, Sync);
