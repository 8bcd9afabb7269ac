//! Seams to the page the engine drives.
//!
//! Browsers implement these over the DOM and `window.history`; the terminal
//! host implements them over a simulated page, and tests use in-memory fakes.

/// Bounding box of a mounted element, relative to the top of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
}

impl ElementRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// The scrollable document
pub trait Document {
    /// Current vertical scroll offset in pixels
    fn scroll_offset(&self) -> f64;

    /// Write the vertical scroll offset
    fn set_scroll_offset(&mut self, offset: f64);

    fn viewport_height(&self) -> f64;

    /// Total height of the scrollable content
    fn scroll_height(&self) -> f64;

    /// Height of the sticky navigation bar, measured on every call
    fn nav_bar_height(&self) -> Option<f64>;

    /// Height of the page header (the `home` pseudo-section)
    fn header_height(&self) -> Option<f64>;

    /// Viewport-relative box of the element with this id, `None` if not mounted
    fn element_rect(&self, id: &str) -> Option<ElementRect>;

    /// Largest reachable scroll offset
    fn max_scroll_offset(&self) -> f64 {
        (self.scroll_height() - self.viewport_height()).max(0.0)
    }
}

/// Session history of the browsing context
pub trait History {
    /// Full current location
    fn href(&self) -> String;

    /// Add a history entry without reloading
    fn push_state(&mut self, url: &str);

    /// Rewrite the current entry without reloading
    fn replace_state(&mut self, url: &str);

    /// Full page load of `url`
    fn assign(&mut self, url: &str);
}
