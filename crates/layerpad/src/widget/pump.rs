//! The air pump widget.
//!
//! An image widget with two visuals: resting and pushed. A completed swipe
//! pushes the pump and then calls [`AirPump::flash`], which starts the pump's
//! own repeating reset timer. When that timer fires the pump returns to its
//! resting visual and stops the timer.
//!
//! The pump owns a single timer slot: starting a new flash always cancels the
//! previous one, so there is never more than one reset timer outstanding.

use layerpad_core::logging::targets;
use layerpad_core::{AppContext, PumpConfig, Result, TimerId, TimerManager, Updatable};

use super::element::{Positioned, PositionedElement};
use super::image::ImageElement;
use super::pointer::PointerHandler;
use crate::surface::SharedSurface;

#[derive(Debug)]
pub struct AirPump {
    image: ImageElement,
    resting_image: String,
    pushed_image: String,
    pushed: bool,
    flash_timer: Option<TimerId>,
}

impl AirPump {
    /// Bind the pump's image region.
    pub fn bind(surface: &SharedSurface, id: impl Into<String>, images: &PumpConfig) -> Result<Self> {
        Ok(Self::new(ImageElement::bind(surface, id)?, images))
    }

    /// Wrap an already bound image element.
    pub fn new(image: ImageElement, images: &PumpConfig) -> Self {
        Self {
            image,
            resting_image: images.resting_image.clone(),
            pushed_image: images.pushed_image.clone(),
            pushed: false,
            flash_timer: None,
        }
    }

    /// Switch to the pushed visual.
    pub fn push(&mut self) {
        self.pushed = true;
        self.image.set_file(&self.pushed_image);
    }

    /// Switch to the resting visual and cancel any pending reset timer.
    pub fn pull(&mut self, timers: &mut TimerManager) {
        self.pushed = false;
        self.image.set_file(&self.resting_image);
        self.stop_flash(timers);
    }

    /// Start the repeating reset timer, replacing any outstanding one.
    pub fn flash(&mut self, ctx: &mut AppContext) {
        let interval = ctx.config().flash_interval();
        let timers = ctx.timers_mut();
        self.stop_flash(timers);
        let id = timers.start_repeating(interval);
        tracing::trace!(target: targets::WIDGET, id = %self.image.element().id(), timer = ?id, "flash started");
        self.flash_timer = Some(id);
    }

    /// Cancel the reset timer. Returns `true` if one was pending.
    pub fn stop_flash(&mut self, timers: &mut TimerManager) -> bool {
        let Some(id) = self.flash_timer.take() else {
            return false;
        };
        if timers.stop(id).is_err() {
            tracing::warn!(target: targets::WIDGET, timer = ?id, "flash timer was already gone");
        }
        true
    }

    /// Route a fired timer. Returns `true` if it was this pump's reset timer.
    pub fn handle_timer(&mut self, timers: &mut TimerManager, id: TimerId) -> bool {
        if self.flash_timer != Some(id) {
            return false;
        }
        self.pull(timers);
        true
    }

    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    /// The pending reset timer, if any.
    pub fn flash_timer(&self) -> Option<TimerId> {
        self.flash_timer
    }

    pub fn image(&self) -> &ImageElement {
        &self.image
    }
}

impl Positioned for AirPump {
    fn element(&self) -> &PositionedElement {
        self.image.element()
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        self.image.element_mut()
    }
}

impl PointerHandler for AirPump {
    fn pointer_id(&self) -> &str {
        self.image.element().id()
    }
}

impl Updatable for AirPump {
    fn update(&mut self, now_ms: u64) {
        self.image.update(now_ms);
    }
}

static_assertions::assert_impl_all!(AirPump: Send, Sync);
