//! Three-region swipe gesture.
//!
//! The gesture watches a vertical strip split into a top region (the
//! gesture's own image), a middle "area" and a bottom region:
//!
//! ```text
//!          down on top
//!   Idle ───────────────▶ Swiping
//!    ▲                      │ move in top/area: stay
//!    │   move in bottom ────┤ (completion fires)
//!    │   move elsewhere ────┤
//!    └────── up ────────────┘
//! ```
//!
//! Completion pushes the pump, bumps the swipe counter in the
//! [`AppContext`], shows the new count, and starts the pump's reset flash.

use std::sync::Arc;

use layerpad_core::logging::targets;
use layerpad_core::{AppContext, Signal, Updatable};
use parking_lot::Mutex;

use super::element::{Positioned, PositionedElement};
use super::image::ImageElement;
use super::pointer::PointerHandler;
use super::pump::AirPump;

/// A region the gesture hit-tests against without owning it.
pub type SharedRegion = Arc<Mutex<dyn Positioned + Send>>;

/// The regions the pointer must cross below the top region.
#[derive(Clone)]
pub struct SwipeRegions {
    /// The middle region; moving through it keeps the swipe alive.
    pub area: SharedRegion,
    /// Reaching this region completes the swipe.
    pub bottom: SharedRegion,
}

/// Swipe state of a [`SwipeGesture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeState {
    #[default]
    Idle,
    Swiping,
}

/// The swipe-to-pump gesture.
pub struct SwipeGesture {
    top: ImageElement,
    regions: SwipeRegions,
    pump: Arc<Mutex<AirPump>>,
    counter: Arc<Mutex<PositionedElement>>,
    state: SwipeState,
    /// Emitted after every completion with the new swipe count.
    pub completed: Signal<u32>,
}

impl SwipeGesture {
    /// Create a gesture whose top region is `top`.
    pub fn new(
        top: ImageElement,
        regions: SwipeRegions,
        pump: Arc<Mutex<AirPump>>,
        counter: Arc<Mutex<PositionedElement>>,
    ) -> Self {
        Self {
            top,
            regions,
            pump,
            counter,
            state: SwipeState::Idle,
            completed: Signal::new(),
        }
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    pub fn is_swiping(&self) -> bool {
        self.state == SwipeState::Swiping
    }

    /// The top region.
    pub fn top(&self) -> &ImageElement {
        &self.top
    }

    fn complete(&mut self, ctx: &mut AppContext) {
        self.pump.lock().push();
        let count = ctx.record_swipe();
        self.counter.lock().set_content(&count.to_string());
        self.pump.lock().flash(ctx);

        tracing::info!(target: targets::SWIPE, count, "swipe complete");
        self.completed.emit(count);
    }
}

impl Positioned for SwipeGesture {
    fn element(&self) -> &PositionedElement {
        self.top.element()
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        self.top.element_mut()
    }
}

impl PointerHandler for SwipeGesture {
    fn pointer_id(&self) -> &str {
        self.top.element().id()
    }

    fn pointer_down(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        if self.top.hit_test(x, y) {
            self.state = SwipeState::Swiping;
        }
        tracing::trace!(target: targets::SWIPE, "down({x},{y}): state={:?}", self.state);
    }

    fn pointer_move(&mut self, ctx: &mut AppContext, x: i32, y: i32) {
        if self.state == SwipeState::Idle {
            return;
        }
        if self.top.hit_test(x, y) || self.regions.area.lock().hit_test(x, y) {
            tracing::trace!(target: targets::SWIPE, "move({x},{y}): still swiping");
            return;
        }

        let reached_bottom = self.regions.bottom.lock().hit_test(x, y);
        self.state = SwipeState::Idle;
        if reached_bottom {
            self.complete(ctx);
        } else {
            tracing::debug!(target: targets::SWIPE, "move({x},{y}): left the strip, swipe aborted");
        }
    }

    fn pointer_up(&mut self, _ctx: &mut AppContext, x: i32, y: i32) {
        if self.state == SwipeState::Swiping {
            tracing::debug!(target: targets::SWIPE, "up({x},{y}): swipe aborted");
        }
        self.state = SwipeState::Idle;
    }
}

impl Updatable for SwipeGesture {
    fn update(&mut self, now_ms: u64) {
        self.top.update(now_ms);
    }
}

impl std::fmt::Debug for SwipeGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeGesture")
            .field("top", &self.top.element().id())
            .field("state", &self.state)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use layerpad_core::PumpConfig;

    use super::*;
    use crate::surface::{MemorySurface, SharedSurface, SurfaceRect};

    struct Fixture {
        surface: Arc<Mutex<MemorySurface>>,
        swipe: SwipeGesture,
        pump: Arc<Mutex<AirPump>>,
        ctx: AppContext,
    }

    fn strip(surface: &mut MemorySurface, id: &str, y: f64) {
        surface.add_image_region(
            id,
            SurfaceRect::new(0.0, y, 10.0, 10.0),
            SurfaceRect::new(0.0, y, 10.0, 10.0),
            format!("img/{id}.png"),
        );
    }

    fn setup() -> Fixture {
        let mut surface = MemorySurface::new();
        strip(&mut surface, "swipe_top", 0.0);
        strip(&mut surface, "swipe_area", 10.0);
        strip(&mut surface, "swipe_bottom", 20.0);
        strip(&mut surface, "air_pump", 100.0);
        surface.add_region("swipe_count", SurfaceRect::new(50.0, 0.0, 10.0, 10.0));
        let surface = Arc::new(Mutex::new(surface));
        let shared: SharedSurface = surface.clone();

        let pump = Arc::new(Mutex::new(
            AirPump::bind(&shared, "air_pump", &PumpConfig::default()).unwrap(),
        ));
        let area: SharedRegion = Arc::new(Mutex::new(ImageElement::bind(&shared, "swipe_area").unwrap()));
        let bottom: SharedRegion =
            Arc::new(Mutex::new(ImageElement::bind(&shared, "swipe_bottom").unwrap()));
        let counter = Arc::new(Mutex::new(
            PositionedElement::bind(&shared, "swipe_count", Some("0")).unwrap(),
        ));
        let top = ImageElement::bind(&shared, "swipe_top").unwrap();
        let swipe = SwipeGesture::new(top, SwipeRegions { area, bottom }, pump.clone(), counter);

        Fixture {
            surface,
            swipe,
            pump,
            ctx: AppContext::default(),
        }
    }

    #[test]
    fn test_swipe_completes_once() {
        let mut f = setup();
        let fired = Arc::new(AtomicU32::new(0));
        let fired_clone = fired.clone();
        f.swipe.completed.connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        f.swipe.pointer_down(&mut f.ctx, 5, 5);
        assert_eq!(f.swipe.state(), SwipeState::Swiping);

        f.swipe.pointer_move(&mut f.ctx, 5, 15);
        assert_eq!(f.swipe.state(), SwipeState::Swiping);

        f.swipe.pointer_move(&mut f.ctx, 5, 25);
        assert_eq!(f.swipe.state(), SwipeState::Idle);
        assert_eq!(f.ctx.swipe_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Further moves after completion do nothing.
        f.swipe.pointer_move(&mut f.ctx, 5, 26);
        assert_eq!(f.ctx.swipe_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_completion_side_effects() {
        let mut f = setup();

        f.swipe.pointer_down(&mut f.ctx, 5, 5);
        f.swipe.pointer_move(&mut f.ctx, 5, 25);

        assert!(f.pump.lock().is_pushed());
        assert!(f.pump.lock().flash_timer().is_some());
        assert_eq!(f.surface.lock().content("swipe_count"), Some("1"));
        assert_eq!(f.surface.lock().image_source("air_pump"), Some("img/AirPump2.png"));
    }

    #[test]
    fn test_leaving_all_regions_aborts() {
        let mut f = setup();

        f.swipe.pointer_down(&mut f.ctx, 5, 5);
        f.swipe.pointer_move(&mut f.ctx, 50, 50);

        assert_eq!(f.swipe.state(), SwipeState::Idle);
        assert_eq!(f.ctx.swipe_count(), 0);
        assert!(!f.pump.lock().is_pushed());

        // Reaching the bottom afterwards does not complete.
        f.swipe.pointer_move(&mut f.ctx, 5, 25);
        assert_eq!(f.ctx.swipe_count(), 0);
    }

    #[test]
    fn test_pointer_up_aborts() {
        let mut f = setup();

        f.swipe.pointer_down(&mut f.ctx, 5, 5);
        f.swipe.pointer_move(&mut f.ctx, 5, 15);
        f.swipe.pointer_up(&mut f.ctx, 5, 15);

        assert_eq!(f.swipe.state(), SwipeState::Idle);
        f.swipe.pointer_move(&mut f.ctx, 5, 25);
        assert_eq!(f.ctx.swipe_count(), 0);
    }

    #[test]
    fn test_down_outside_top_stays_idle() {
        let mut f = setup();

        f.swipe.pointer_down(&mut f.ctx, 5, 15);
        assert_eq!(f.swipe.state(), SwipeState::Idle);
    }

    #[test]
    fn test_two_completions_leave_one_timer() {
        let mut f = setup();

        for _ in 0..2 {
            f.swipe.pointer_down(&mut f.ctx, 5, 5);
            f.swipe.pointer_move(&mut f.ctx, 5, 25);
        }

        assert_eq!(f.ctx.swipe_count(), 2);
        assert_eq!(f.ctx.timers().active_count(), 1);
        assert_eq!(f.surface.lock().content("swipe_count"), Some("2"));
    }
}
