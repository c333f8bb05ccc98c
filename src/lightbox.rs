//! Gallery lightbox: an indexed, cyclic carousel shown in an overlay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{LightboxConfig, OPEN_CLASS, prelude::*};

/// One gallery image as found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Thumbnail URL
    pub src:     String,
    pub alt:     String,
    /// Text of the enclosing caption container, untrimmed
    #[serde(default)]
    pub caption: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            src:     src.into(),
            alt:     alt.into(),
            caption: caption.into(),
        }
    }
}

/// Ordered gallery images, fixed once the page is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageList(Vec<ImageRef>);

impl FromIterator<ImageRef> for ImageList {
    fn from_iter<I: IntoIterator<Item = ImageRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightboxState {
    pub current_index: usize,
    pub is_open:       bool,
}

/// Keys the lightbox listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowRight,
    ArrowLeft,
    Other,
}

impl From<&str> for Key {
    /// Maps a DOM `KeyboardEvent.key` value
    fn from(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowRight" => Self::ArrowRight,
            "ArrowLeft" => Self::ArrowLeft,
            _ => Self::Other,
        }
    }
}

/// Clickable parts of the gallery and overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Gallery thumbnail at the given position
    Image(usize),
    Close,
    Backdrop,
    Prev,
    Next,
}

/// What the overlay should show after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub index:   usize,
    /// Full-resolution URL
    pub src:     String,
    pub alt:     String,
    pub caption: String,
    pub is_open: bool,
}

impl LightboxView {
    /// Value for the overlay's `aria-hidden` attribute
    pub const fn aria_hidden(&self) -> &'static str {
        if self.is_open { "false" } else { "true" }
    }

    /// Class the overlay carries, if any
    pub const fn open_class(&self) -> Option<&'static str> {
        if self.is_open { Some(OPEN_CLASS) } else { None }
    }
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    images: ImageList,
    state:  LightboxState,
    config: LightboxConfig,
}

impl Lightbox {
    /// Returns `None` for an empty gallery; there is nothing to show.
    pub fn new(images: ImageList, config: LightboxConfig) -> Option<Self> {
        if images.is_empty() {
            debug!("no gallery images, lightbox disabled");
            return None;
        }
        Some(Self {
            images,
            state: LightboxState::default(),
            config,
        })
    }

    pub const fn state(&self) -> LightboxState {
        self.state
    }

    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub const fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    /// Shows the image at `index`, wrapped into range, and opens the overlay.
    pub fn open(&mut self, index: i64) -> LightboxView {
        let index = wrap_index(index, self.images.len());
        self.show(index)
    }

    pub fn close(&mut self) -> LightboxView {
        self.state.is_open = false;
        debug!(index = self.state.current_index, "lightbox closed");
        self.view()
    }

    pub fn next(&mut self) -> LightboxView {
        let len = self.images.len();
        self.show((self.state.current_index + 1) % len)
    }

    pub fn prev(&mut self) -> LightboxView {
        let len = self.images.len();
        self.show((self.state.current_index + len - 1) % len)
    }

    /// Keys are ignored while the overlay is closed.
    pub fn handle_key(&mut self, key: Key) -> Option<LightboxView> {
        if !self.state.is_open {
            return None;
        }
        match key {
            Key::Escape => Some(self.close()),
            Key::ArrowRight => Some(self.next()),
            Key::ArrowLeft => Some(self.prev()),
            Key::Other => None,
        }
    }

    /// Clicks on thumbnails that do not exist are ignored.
    pub fn handle_click(&mut self, control: Control) -> Option<LightboxView> {
        match control {
            Control::Image(index) if index < self.images.len() => Some(self.show(index)),
            Control::Image(index) => {
                debug!(index, "click on unknown gallery image ignored");
                None
            }
            Control::Close | Control::Backdrop => Some(self.close()),
            Control::Prev => Some(self.prev()),
            Control::Next => Some(self.next()),
        }
    }

    /// Describes the overlay for the current state
    pub fn view(&self) -> LightboxView {
        let image = &self.images[self.state.current_index];
        LightboxView {
            index:   self.state.current_index,
            src:     self.config.full_resolution(&image.src),
            alt:     image.alt.clone(),
            caption: image.caption.trim().to_owned(),
            is_open: self.state.is_open,
        }
    }

    fn show(&mut self, index: usize) -> LightboxView {
        self.state.current_index = index;
        self.state.is_open = true;
        debug!(index, "lightbox showing image");
        self.view()
    }
}

/// `((index mod len) + len) mod len`; `len` must be non-zero.
fn wrap_index(index: i64, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    usize::try_from(index.rem_euclid(len)).unwrap_or_default()
}
