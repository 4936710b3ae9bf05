//! Air pump demo.
//!
//! Builds the scene over an in-memory surface and replays a scripted pointer
//! session: one aborted swipe, two completed swipes, then enough ticks for
//! the pump to return to rest.
//!
//! Run with: cargo run -p layerpad --example air_pump
//!
//! Pass a TOML file as the first argument to override the defaults, and set
//! `RUST_LOG=layerpad=trace` to see every transition.

use layerpad::prelude::*;
use layerpad::surface::{MemorySurface, SurfaceRect};
use tracing_subscriber::EnvFilter;

fn build_surface() -> SharedSurface {
    let mut surface = MemorySurface::new();
    let strip = [("swipe_top", 100.0), ("swipe_area", 160.0), ("swipe_bottom", 220.0)];
    for (id, y) in strip {
        let rect = SurfaceRect::new(40.0, y, 60.0, 60.0);
        surface.add_image_region(id, rect, rect, format!("assets/{id}.png"));
    }

    let pump = SurfaceRect::new(200.0, 100.0, 120.0, 180.0);
    surface
        .add_image_region("air_pump", pump, pump, "assets/AirPump1.png")
        .add_region("swipe_count", SurfaceRect::new(200.0, 40.0, 40.0, 24.0));
    surface.into_shared()
}

fn swipe(scene: &mut AirPumpScene, to_bottom: bool) {
    scene.dispatch("swipe_top", &RawPointerEvent::mouse_down(70.0, 120.0));
    scene.dispatch("swipe_area", &RawPointerEvent::mouse_move(70.4, 190.2));
    if to_bottom {
        scene.dispatch("swipe_bottom", &RawPointerEvent::touch_move(69.6, 250.0));
    }
    scene.dispatch("swipe_bottom", &RawPointerEvent::mouse_up(70.0, 250.0));
}

fn main() -> layerpad::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::args().nth(1) {
        Some(path) => LayerpadConfig::load(path)?,
        None => LayerpadConfig::default(),
    };
    let tick_ms = config.update_interval_ms;

    let mut scene = AirPumpScene::bind(build_surface(), config)?;
    scene.enable_updates();
    scene.on_swipe_completed(|count| println!("swipe #{count} completed"));

    // Aborted: released in the middle region.
    swipe(&mut scene, false);
    swipe(&mut scene, true);
    swipe(&mut scene, true);

    println!(
        "count={} display={:?} pushed={}",
        scene.swipe_count(),
        scene.counter_text(),
        scene.pump().lock().is_pushed()
    );

    let mut now = 0;
    while scene.pump().lock().is_pushed() {
        now += tick_ms;
        scene.tick(now);
    }
    println!("pump back at rest after {now}ms");

    scene.shutdown();
    Ok(())
}
