#![forbid(unsafe_code)]

//! Index-based show/hide over a fixed set of slides.
//!
//! Exactly one slide carries the `active` class after any navigation.
//! Requests past either end wrap around: anything at or beyond the length
//! lands on the first slide, anything negative on the last. An empty set
//! ignores every request.
//!
//! The testimonial slider is a bare [`Carousel`]; the photo slideshow wraps
//! one with dot indicators and autoplay (see [`crate::slideshow`]).

use crate::page::{ElementId, Page, PageResult};

pub const TESTIMONIALS: &str = ".testimonial-slide";

const ACTIVE: &str = "active";

/// Resolve a requested index against `len` slides.
///
/// Returns `None` when there are no slides.
pub fn wrap_index(requested: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match usize::try_from(requested) {
        Ok(n) if n < len => n,
        Ok(_) => 0,
        Err(_) => len - 1,
    })
}

/// Current-index state over a slide collection plus optional indicators.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    current: usize,
}

impl Carousel {
    /// Carousel over `slides` without indicators.
    pub fn new(slides: Vec<ElementId>) -> Self {
        Self::with_indicators(slides, Vec::new())
    }

    /// Carousel whose `indicators[i]` mirrors the active state of
    /// `slides[i]`. Fewer indicators than slides is tolerated.
    pub fn with_indicators(slides: Vec<ElementId>, indicators: Vec<ElementId>) -> Self {
        Self {
            slides,
            indicators,
            current: 0,
        }
    }

    /// The testimonial slider: every `.testimonial-slide`, with the first one
    /// activated because the markup may not mark any slide active.
    pub fn mount_testimonials(page: &mut dyn Page) -> PageResult<Self> {
        let mut carousel = Self::new(page.query_all(TESTIMONIALS));
        carousel.show(page, 0)?;
        Ok(carousel)
    }

    /// Activate slide `requested` (wrapping) and deactivate all others.
    ///
    /// Returns the resolved index, or `None` for an empty carousel.
    pub fn show(&mut self, page: &mut dyn Page, requested: i64) -> PageResult<Option<usize>> {
        let Some(index) = wrap_index(requested, self.slides.len()) else {
            return Ok(None);
        };
        self.current = index;
        for &slide in &self.slides {
            page.remove_class(slide, ACTIVE)?;
        }
        for &dot in &self.indicators {
            page.remove_class(dot, ACTIVE)?;
        }
        page.add_class(self.slides[index], ACTIVE)?;
        if let Some(&dot) = self.indicators.get(index) {
            page.add_class(dot, ACTIVE)?;
        }
        Ok(Some(index))
    }

    /// Move `direction` slides from the current one.
    pub fn change(&mut self, page: &mut dyn Page, direction: i64) -> PageResult<Option<usize>> {
        let requested = (self.current as i64).saturating_add(direction);
        self.show(page, requested)
    }

    /// Index of the active slide.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }
}
