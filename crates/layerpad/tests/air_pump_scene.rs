//! End-to-end tests for the air pump scene over an in-memory surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use layerpad::prelude::*;
use layerpad::surface::{MemorySurface, SurfaceRect};
use layerpad::widget::PointerKind;
use parking_lot::Mutex;

struct Harness {
    surface: Arc<Mutex<MemorySurface>>,
    scene: AirPumpScene,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(LayerpadConfig::default())
    }

    fn with_config(config: LayerpadConfig) -> Self {
        let mut surface = MemorySurface::new();
        for (id, y) in [("swipe_top", 0.0), ("swipe_area", 10.0), ("swipe_bottom", 20.0)] {
            let rect = SurfaceRect::new(0.0, y, 10.0, 10.0);
            surface.add_image_region(id, rect, rect, format!("img/{id}.png"));
        }
        let pump = SurfaceRect::new(100.0, 0.0, 50.0, 80.0);
        surface
            .add_image_region("air_pump", pump, pump, "img/AirPump1.png")
            .add_region("swipe_count", SurfaceRect::new(200.0, 0.0, 20.0, 20.0));

        let surface = Arc::new(Mutex::new(surface));
        let shared: SharedSurface = surface.clone();
        let scene = AirPumpScene::bind(shared, config).unwrap();
        Self { surface, scene }
    }

    fn down(&mut self, target: &str, x: f64, y: f64) -> EventDisposition {
        self.scene.dispatch(target, &RawPointerEvent::mouse_down(x, y))
    }

    fn moved(&mut self, target: &str, x: f64, y: f64) -> EventDisposition {
        self.scene.dispatch(target, &RawPointerEvent::mouse_move(x, y))
    }

    fn up(&mut self, target: &str, x: f64, y: f64) -> EventDisposition {
        self.scene.dispatch(target, &RawPointerEvent::mouse_up(x, y))
    }

    fn full_swipe(&mut self) {
        self.down("swipe_top", 5.0, 5.0);
        self.moved("swipe_area", 5.0, 15.0);
        self.moved("swipe_bottom", 5.0, 25.0);
        self.up("swipe_bottom", 5.0, 25.0);
    }

    fn pump_image(&self) -> Option<String> {
        self.surface.lock().image_source("air_pump").map(str::to_string)
    }
}

#[test]
fn swipe_completion_end_to_end() {
    let mut h = Harness::new();
    let completions = Arc::new(AtomicU32::new(0));
    let seen = completions.clone();
    h.scene.on_swipe_completed(move |count| {
        seen.store(*count, Ordering::SeqCst);
    });

    assert_eq!(
        h.down("swipe_top", 5.0, 5.0),
        EventDisposition::Dispatched(PointerKind::Down)
    );
    assert_eq!(h.scene.swipe_state(), SwipeState::Swiping);

    h.moved("swipe_area", 5.0, 15.0);
    assert_eq!(h.scene.swipe_state(), SwipeState::Swiping);
    assert_eq!(h.scene.swipe_count(), 0);

    h.moved("swipe_bottom", 5.0, 25.0);
    assert_eq!(h.scene.swipe_state(), SwipeState::Idle);
    assert_eq!(h.scene.swipe_count(), 1);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert_eq!(h.scene.counter_text().as_deref(), Some("1"));
    assert_eq!(h.surface.lock().content("swipe_count"), Some("1"));
    assert_eq!(h.pump_image().as_deref(), Some("img/AirPump2.png"));
}

#[test]
fn swipe_aborts_when_pointer_leaves_strip() {
    let mut h = Harness::new();

    h.down("swipe_top", 5.0, 5.0);
    h.moved("page", 50.0, 50.0);
    assert_eq!(h.scene.swipe_state(), SwipeState::Idle);

    h.moved("swipe_bottom", 5.0, 25.0);
    assert_eq!(h.scene.swipe_count(), 0);
    assert_eq!(h.scene.counter_text().as_deref(), Some("0"));
    assert_eq!(h.pump_image().as_deref(), Some("img/AirPump1.png"));
}

#[test]
fn swipe_aborts_on_pointer_up() {
    let mut h = Harness::new();

    h.down("swipe_top", 5.0, 5.0);
    h.moved("swipe_area", 5.0, 15.0);
    h.up("swipe_area", 5.0, 15.0);
    assert_eq!(h.scene.swipe_state(), SwipeState::Idle);

    h.moved("swipe_bottom", 5.0, 25.0);
    assert_eq!(h.scene.swipe_count(), 0);
}

#[test]
fn touch_input_completes_swipe() {
    let mut h = Harness::new();

    h.scene.dispatch("swipe_top", &RawPointerEvent::touch_start(4.6, 5.2));
    h.scene.dispatch("swipe_area", &RawPointerEvent::touch_move(5.0, 14.7));
    h.scene.dispatch("swipe_bottom", &RawPointerEvent::touch_move(5.0, 24.5));

    assert_eq!(h.scene.swipe_count(), 1);
}

#[test]
fn native_drag_is_suppressed() {
    let mut h = Harness::new();

    let disposition = h.scene.dispatch("swipe_top", &RawPointerEvent::DragStart);
    assert_eq!(disposition, EventDisposition::Suppressed);
    assert!(disposition.prevents_default());
    assert_eq!(h.scene.swipe_state(), SwipeState::Idle);
}

#[test]
fn repeated_completion_keeps_one_reset_timer() {
    let mut h = Harness::new();

    h.full_swipe();
    h.full_swipe();

    assert_eq!(h.scene.swipe_count(), 2);
    assert_eq!(h.scene.ctx().timers().active_count(), 1);
    assert_eq!(h.scene.counter_text().as_deref(), Some("2"));
}

#[test]
fn pump_returns_to_rest_after_flash_interval() {
    let mut h = Harness::new();
    h.full_swipe();
    assert!(h.scene.pump().lock().is_pushed());

    assert!(h.scene.tick(299).is_empty());
    assert!(h.scene.pump().lock().is_pushed());

    assert_eq!(h.scene.tick(300).len(), 1);
    assert!(!h.scene.pump().lock().is_pushed());
    assert_eq!(h.pump_image().as_deref(), Some("img/AirPump1.png"));
    assert_eq!(h.scene.ctx().timers().active_count(), 0);

    // The timer was stopped by the pump; nothing fires later.
    assert!(h.scene.tick(600).is_empty());
}

#[test]
fn flash_interval_comes_from_config() {
    let config = LayerpadConfig::from_toml_str("flash_interval_ms = 50").unwrap();
    let mut h = Harness::with_config(config);
    h.full_swipe();

    assert_eq!(h.scene.tick(50).len(), 1);
    assert!(!h.scene.pump().lock().is_pushed());
}

#[test]
fn updates_tick_registered_widgets_once() {
    let mut h = Harness::new();

    assert_eq!(h.scene.enable_updates(), 5);
    assert_eq!(h.scene.enable_updates(), 0);
    h.scene.tick(27);

    assert_eq!(h.scene.ctx().updates().tick(54), 5);
}

#[test]
fn shutdown_resets_context() {
    let mut h = Harness::new();
    h.scene.enable_updates();
    h.full_swipe();

    h.scene.shutdown();

    assert_eq!(h.scene.swipe_count(), 0);
    assert_eq!(h.scene.ctx().timers().active_count(), 0);
    assert!(h.scene.ctx().updates().is_empty());
    assert_eq!(h.scene.pump().lock().flash_timer(), None);
}

#[test]
fn missing_region_fails_bind() {
    let surface = MemorySurface::new().into_shared();
    let err = AirPumpScene::bind(surface, LayerpadConfig::default()).unwrap_err();
    assert!(matches!(err, LayerpadError::MissingRegion { ref id } if id == "air_pump"));
}
