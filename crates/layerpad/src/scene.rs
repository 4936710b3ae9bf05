//! The air pump scene.
//!
//! Wires a pump image, the three swipe regions, the swipe gesture and the
//! swipe counter display to one [`AppContext`]. The host forwards raw pointer
//! events tagged with the id of the region they landed on, and calls
//! [`AirPumpScene::tick`] from its periodic tick source.
//!
//! # Pointer capture
//!
//! While a swipe is in progress the gesture captures the pointer: every event
//! goes to the gesture regardless of the region it landed on, including ids
//! the scene does not know. This lets the gesture see the pointer leave the
//! top region.

use std::sync::Arc;

use layerpad_core::logging::{span_names, targets};
use layerpad_core::{
    AppContext, ConnectionId, LayerpadConfig, PerfSpan, PeriodicUpdateRegistry, Result, TimerId,
    Updatable,
};
use parking_lot::Mutex;

use crate::surface::SharedSurface;
use crate::widget::{
    AirPump, EventDisposition, ImageElement, PointerHandler, Positioned, PositionedElement,
    RawPointerEvent, SharedRegion, SwipeGesture, SwipeRegions, SwipeState,
};

/// Which widget a dispatched event reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Pump,
    Swipe,
    Area,
    Bottom,
    Nowhere,
}

/// The worked example: swipe down the strip to push the air pump.
pub struct AirPumpScene {
    ctx: AppContext,
    pump: Arc<Mutex<AirPump>>,
    area: Arc<Mutex<ImageElement>>,
    bottom: Arc<Mutex<ImageElement>>,
    counter: Arc<Mutex<PositionedElement>>,
    swipe: Arc<Mutex<SwipeGesture>>,
}

impl AirPumpScene {
    /// Bind every scene widget to `surface`.
    ///
    /// Widgets are bound in the order pump, middle region, bottom region,
    /// top region, counter. The counter display starts at `"0"`.
    ///
    /// # Errors
    ///
    /// Fails on the first region id the surface does not have.
    pub fn bind(surface: SharedSurface, config: LayerpadConfig) -> Result<Self> {
        let ids = config.regions.clone();

        let pump = Arc::new(Mutex::new(AirPump::bind(&surface, &ids.pump, &config.pump)?));
        let area = Arc::new(Mutex::new(ImageElement::bind(&surface, &ids.area)?));
        let bottom = Arc::new(Mutex::new(ImageElement::bind(&surface, &ids.bottom)?));
        let top = ImageElement::bind(&surface, &ids.top)?;

        let ctx = AppContext::new(config);
        let counter = Arc::new(Mutex::new(PositionedElement::bind(
            &surface,
            &ids.counter,
            Some(&ctx.swipe_count().to_string()),
        )?));

        let area_region: SharedRegion = area.clone();
        let bottom_region: SharedRegion = bottom.clone();
        let swipe = SwipeGesture::new(
            top,
            SwipeRegions {
                area: area_region,
                bottom: bottom_region,
            },
            pump.clone(),
            counter.clone(),
        );

        tracing::debug!(target: targets::WIDGET, "air pump scene bound");

        Ok(Self {
            ctx,
            pump,
            area,
            bottom,
            counter,
            swipe: Arc::new(Mutex::new(swipe)),
        })
    }

    // =========================================================================
    // Host entry points
    // =========================================================================

    /// Deliver a raw pointer event that landed on region `target`.
    pub fn dispatch(&mut self, target: &str, raw: &RawPointerEvent) -> EventDisposition {
        let _span = PerfSpan::new(span_names::POINTER);
        let route = self.route(target);
        tracing::trace!(target: targets::POINTER, target_id = target, ?route, "dispatch");

        match route {
            Route::Swipe => self.swipe.lock().handle_raw(&mut self.ctx, raw),
            Route::Pump => self.pump.lock().handle_raw(&mut self.ctx, raw),
            Route::Area => self.area.lock().handle_raw(&mut self.ctx, raw),
            Route::Bottom => self.bottom.lock().handle_raw(&mut self.ctx, raw),
            Route::Nowhere => {
                tracing::warn!(target: targets::POINTER, target_id = target, "event for unknown region");
                EventDisposition::Ignored
            }
        }
    }

    fn route(&self, target: &str) -> Route {
        let ids = &self.ctx.config().regions;
        let capturing = self.swipe.lock().is_swiping();

        if target == ids.top || capturing {
            return Route::Swipe;
        }
        if target == ids.pump {
            Route::Pump
        } else if target == ids.area {
            Route::Area
        } else if target == ids.bottom {
            Route::Bottom
        } else {
            Route::Nowhere
        }
    }

    /// Drive one host tick: advance timers, route fired timers to their
    /// owners and run the periodic update hooks.
    ///
    /// Returns the timers that fired.
    pub fn tick(&mut self, now_ms: u64) -> Vec<TimerId> {
        let _span = PerfSpan::new(span_names::TICK);

        let fired = self.ctx.tick(now_ms);
        for &id in &fired {
            if !self.pump.lock().handle_timer(self.ctx.timers_mut(), id) {
                tracing::warn!(target: targets::TIMER, timer = ?id, "fired timer has no owner");
            }
        }
        fired
    }

    /// Opt every scene widget into periodic updates.
    ///
    /// Newly registered widgets log laps at the configured
    /// `lap_log_interval_ms`. Idempotent. Returns how many widgets were newly
    /// registered.
    pub fn enable_updates(&mut self) -> usize {
        let ids = self.ctx.config().regions.clone();
        let interval_ms = self.ctx.config().lap_log_interval_ms;
        let updates = self.ctx.updates_mut();

        [
            enable(updates, &ids.pump, &self.pump, interval_ms),
            enable(updates, &ids.area, &self.area, interval_ms),
            enable(updates, &ids.bottom, &self.bottom, interval_ms),
            enable(updates, &ids.top, &self.swipe, interval_ms),
            enable(updates, &ids.counter, &self.counter, interval_ms),
        ]
        .into_iter()
        .filter(|added| *added)
        .count()
    }

    /// Connect a slot to the swipe gesture's completion signal.
    pub fn on_swipe_completed<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&u32) + Send + Sync + 'static,
    {
        self.swipe.lock().completed.connect(slot)
    }

    /// Stop all timers, clear the update registry and reset the count.
    ///
    /// The counter display keeps its last text.
    pub fn shutdown(&mut self) {
        self.pump.lock().stop_flash(self.ctx.timers_mut());
        self.ctx.shutdown();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn swipe_count(&self) -> u32 {
        self.ctx.swipe_count()
    }

    pub fn swipe_state(&self) -> SwipeState {
        self.swipe.lock().state()
    }

    /// Text currently shown by the counter display.
    pub fn counter_text(&self) -> Option<String> {
        self.counter.lock().content().map(str::to_string)
    }

    pub fn pump(&self) -> &Arc<Mutex<AirPump>> {
        &self.pump
    }

    pub fn swipe(&self) -> &Arc<Mutex<SwipeGesture>> {
        &self.swipe
    }
}

fn enable<W>(
    updates: &mut PeriodicUpdateRegistry,
    label: &str,
    widget: &Arc<Mutex<W>>,
    interval_ms: u64,
) -> bool
where
    W: Positioned + Updatable + Send + 'static,
{
    let added = updates.register(label, widget);
    if added {
        widget.lock().element_mut().set_lap_interval(interval_ms);
    }
    added
}

impl std::fmt::Debug for AirPumpScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirPumpScene")
            .field("ctx", &self.ctx)
            .field("pump", &self.pump)
            .field("swipe", &self.swipe)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, SurfaceRect};

    fn surface() -> SharedSurface {
        let mut surface = MemorySurface::new();
        for (id, y) in [("swipe_top", 0.0), ("swipe_area", 10.0), ("swipe_bottom", 20.0)] {
            let rect = SurfaceRect::new(0.0, y, 10.0, 10.0);
            surface.add_image_region(id, rect, rect, format!("img/{id}.png"));
        }
        let pump = SurfaceRect::new(100.0, 0.0, 50.0, 50.0);
        surface
            .add_image_region("air_pump", pump, pump, "img/AirPump1.png")
            .add_region("swipe_count", SurfaceRect::new(200.0, 0.0, 20.0, 20.0));
        surface.into_shared()
    }

    #[test]
    fn test_bind_shows_zero() {
        let scene = AirPumpScene::bind(surface(), LayerpadConfig::default()).unwrap();
        assert_eq!(scene.counter_text().as_deref(), Some("0"));
        assert_eq!(scene.swipe_state(), SwipeState::Idle);
    }

    #[test]
    fn test_bind_missing_region() {
        let mut config = LayerpadConfig::default();
        config.regions.bottom = "nope".to_string();

        let err = AirPumpScene::bind(surface(), config).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_capture_routes_to_gesture() {
        let mut scene = AirPumpScene::bind(surface(), LayerpadConfig::default()).unwrap();

        scene.dispatch("swipe_top", &RawPointerEvent::mouse_down(5.0, 5.0));
        assert_eq!(scene.route("swipe_area"), Route::Swipe);
        assert_eq!(scene.route("elsewhere"), Route::Swipe);

        scene.dispatch("swipe_top", &RawPointerEvent::mouse_up(5.0, 5.0));
        assert_eq!(scene.route("swipe_area"), Route::Area);
        assert_eq!(scene.route("elsewhere"), Route::Nowhere);
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let mut scene = AirPumpScene::bind(surface(), LayerpadConfig::default()).unwrap();
        let disposition = scene.dispatch("elsewhere", &RawPointerEvent::mouse_move(1.0, 1.0));
        assert_eq!(disposition, EventDisposition::Ignored);
    }

    #[test]
    fn test_enable_updates_is_idempotent() {
        let mut scene = AirPumpScene::bind(surface(), LayerpadConfig::default()).unwrap();

        assert_eq!(scene.enable_updates(), 5);
        assert_eq!(scene.enable_updates(), 0);
        assert_eq!(scene.ctx().updates().len(), 5);
    }

    #[test]
    fn test_enable_updates_applies_lap_interval() {
        let config = LayerpadConfig::from_toml_str("lap_log_interval_ms = 250").unwrap();
        let mut scene = AirPumpScene::bind(surface(), config).unwrap();
        assert_eq!(
            scene.counter.lock().lap_interval_ms(),
            layerpad_core::config::DEFAULT_LAP_LOG_INTERVAL_MS
        );

        scene.enable_updates();
        assert_eq!(scene.pump.lock().element().lap_interval_ms(), 250);
        assert_eq!(scene.area.lock().element().lap_interval_ms(), 250);
        assert_eq!(scene.bottom.lock().element().lap_interval_ms(), 250);
        assert_eq!(scene.swipe.lock().element().lap_interval_ms(), 250);
        assert_eq!(scene.counter.lock().lap_interval_ms(), 250);
    }
}
