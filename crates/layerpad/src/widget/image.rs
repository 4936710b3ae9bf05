//! Image widgets.
//!
//! An [`ImageElement`] wraps a region whose visual content is an image. Its
//! interactive bounds are those of the image itself, not of the container,
//! and its image can be swapped by file name relative to a fixed base.

use layerpad_core::logging::targets;
use layerpad_core::{LayerpadError, Result, Updatable};

use super::element::{Geometry, Positioned, PositionedElement};
use super::movable::Movable;
use super::pointer::PointerHandler;
use crate::surface::SharedSurface;

/// An image locator split into an immutable base and a swappable file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    base_url: String,
    file_name: String,
}

impl ImageSource {
    /// Split a locator at its last `/`. The base keeps the trailing slash.
    ///
    /// ```
    /// use layerpad::widget::ImageSource;
    ///
    /// let src = ImageSource::from_locator("http://host/img/AirPump1.png");
    /// assert_eq!(src.base_url(), "http://host/img/");
    /// assert_eq!(src.file_name(), "AirPump1.png");
    /// ```
    pub fn from_locator(locator: &str) -> Self {
        let split = locator.rfind('/').map_or(0, |n| n + 1);
        let (base, file) = locator.split_at(split);
        Self {
            base_url: base.to_string(),
            file_name: file.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The full locator.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.file_name)
    }

    fn set_file_name(&mut self, file_name: &str) {
        self.file_name = file_name.to_string();
    }
}

/// A positioned element whose content is a swappable image.
#[derive(Debug)]
pub struct ImageElement {
    element: PositionedElement,
    source: ImageSource,
}

impl ImageElement {
    /// Bind to a region that wraps an image node.
    ///
    /// # Errors
    ///
    /// [`LayerpadError::MissingRegion`] if the region does not exist and
    /// [`LayerpadError::MissingImage`] if it has no image node.
    pub fn bind(surface: &SharedSurface, id: impl Into<String>) -> Result<Self> {
        let mut element = PositionedElement::bind(surface, id, None)?;

        let image = surface
            .lock()
            .region(element.id())
            .and_then(|snapshot| snapshot.image)
            .ok_or_else(|| LayerpadError::missing_image(element.id()))?;

        element.rebase_geometry(Geometry::from_surface_rect(image.bounds));
        let source = ImageSource::from_locator(&image.source);
        tracing::debug!(
            target: targets::WIDGET,
            id = %element.id(),
            "{} / {}",
            source.base_url(),
            source.file_name()
        );

        Ok(Self { element, source })
    }

    /// Swap the image to `file_name` under the original base location.
    ///
    /// The resource is not checked for existence.
    pub fn set_file(&mut self, file_name: &str) {
        self.source.set_file_name(file_name);
        let url = self.source.url();
        self.element
            .surface()
            .lock()
            .set_image_source(self.element.id(), &url);
    }

    pub fn file_name(&self) -> &str {
        self.source.file_name()
    }

    pub fn base_url(&self) -> &str {
        self.source.base_url()
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

impl Positioned for ImageElement {
    fn element(&self) -> &PositionedElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut PositionedElement {
        &mut self.element
    }
}

impl Movable for ImageElement {}

impl PointerHandler for ImageElement {
    fn pointer_id(&self) -> &str {
        self.element.id()
    }
}

impl Updatable for ImageElement {
    fn update(&mut self, now_ms: u64) {
        self.element.update(now_ms);
    }
}

static_assertions::assert_impl_all!(ImageElement: Send, Sync);
