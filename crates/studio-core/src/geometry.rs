#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.

/// Vertical extent of an element relative to the viewport's top edge.
///
/// Mirrors the `top`/`height` pair of `getBoundingClientRect()`; `top` is
/// negative once the element has scrolled past the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Distance from the viewport top to the element's top edge.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge relative to the viewport top.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the top edge lies above `fraction` of the viewport height.
    #[inline]
    pub fn top_above(&self, viewport: &Viewport, fraction: f64) -> bool {
        self.top < viewport.height * fraction
    }
}

/// Current window viewport state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Inner height of the window.
    pub height: f64,
    /// Vertical scroll offset of the document.
    pub scroll_y: f64,
}

impl Viewport {
    /// Create a viewport.
    #[inline]
    pub const fn new(height: f64, scroll_y: f64) -> Self {
        Self { height, scroll_y }
    }

    /// Vertical midpoint of the viewport.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.height / 2.0
    }
}
