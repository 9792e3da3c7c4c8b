#![forbid(unsafe_code)]

//! Photo slideshow with dot indicators and autoplay.
//!
//! Autoplay is a repeating timer that advances one slide per period. Any
//! manual navigation (`change_slide`, `go_to_slide`) stops it for good until
//! the visitor restarts it with the toggle control.
//!
//! # Invariants
//!
//! 1. Autoplay is running if and only if a timer handle is held.
//! 2. Starting while running replaces the timer instead of stacking a second.
//! 3. Stopping is idempotent.

use core::time::Duration;

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::page::{Command, ElementId, Page, PageResult, Task, TimerId};

pub const CONTAINER: &str = ".slideshow-container";
pub const SLIDES: &str = ".slide";
pub const DOTS: &str = ".dot";
pub const TOGGLE: &str = ".autoplay-toggle";

/// Autoplay timer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Autoplay {
    timer: Option<TimerId>,
}

impl Autoplay {
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}

/// The slideshow widget.
#[derive(Debug, Clone)]
pub struct Slideshow {
    carousel: Carousel,
    autoplay: Autoplay,
    toggle: Option<ElementId>,
    period: Duration,
    pause_label: String,
    start_label: String,
}

impl Slideshow {
    /// Collect slides, dots and the toggle control. Autoplay starts when the
    /// slideshow container is on the page and holds at least one slide.
    pub fn mount(page: &mut dyn Page, config: &SiteConfig) -> PageResult<Self> {
        let has_container = page.query(CONTAINER).is_some();
        let carousel = Carousel::with_indicators(page.query_all(SLIDES), page.query_all(DOTS));
        let mut slideshow = Self {
            carousel,
            autoplay: Autoplay::default(),
            toggle: page.query(TOGGLE),
            period: config.autoplay_interval(),
            pause_label: config.autoplay_pause_label.clone(),
            start_label: config.autoplay_start_label.clone(),
        };
        if has_container {
            slideshow.start_autoplay(page)?;
        }
        Ok(slideshow)
    }

    /// Show slide `n` (wrapping) without touching autoplay.
    pub fn show_slide(&mut self, page: &mut dyn Page, n: i64) -> PageResult<Option<usize>> {
        self.carousel.show(page, n)
    }

    /// Step `direction` slides and stop autoplay.
    pub fn change_slide(&mut self, page: &mut dyn Page, direction: i64) -> PageResult<()> {
        let moved = self.carousel.change(page, direction);
        self.stop_autoplay(page)?;
        moved.map(drop)
    }

    /// Jump to slide `n` and stop autoplay.
    pub fn go_to_slide(&mut self, page: &mut dyn Page, n: i64) -> PageResult<()> {
        let moved = self.carousel.show(page, n);
        self.stop_autoplay(page)?;
        moved.map(drop)
    }

    /// Arm the autoplay timer. No-op without slides.
    pub fn start_autoplay(&mut self, page: &mut dyn Page) -> PageResult<()> {
        if self.carousel.is_empty() {
            return Ok(());
        }
        if let Some(previous) = self.autoplay.timer.take() {
            page.clear_interval(previous);
        }
        self.autoplay.timer = Some(page.set_interval(self.period, Task::AdvanceSlide)?);
        crate::debug!(period_ms = self.period.as_millis() as u64, "autoplay started");
        self.set_toggle_label(page, true)
    }

    /// Cancel the autoplay timer, if any.
    pub fn stop_autoplay(&mut self, page: &mut dyn Page) -> PageResult<()> {
        if let Some(timer) = self.autoplay.timer.take() {
            page.clear_interval(timer);
            crate::debug!("autoplay stopped");
        }
        self.set_toggle_label(page, false)
    }

    /// Stop if running, start otherwise.
    pub fn toggle_autoplay(&mut self, page: &mut dyn Page) -> PageResult<()> {
        if self.autoplay.is_running() {
            self.stop_autoplay(page)
        } else {
            self.start_autoplay(page)
        }
    }

    /// Apply a slideshow command. Commands for other widgets are ignored.
    pub fn run(&mut self, page: &mut dyn Page, command: Command) -> PageResult<()> {
        match command {
            Command::ShowSlide(n) => self.show_slide(page, n).map(drop),
            Command::ChangeSlide(direction) => self.change_slide(page, direction),
            Command::GoToSlide(n) => self.go_to_slide(page, n),
            Command::StartAutoplay => self.start_autoplay(page),
            Command::StopAutoplay => self.stop_autoplay(page),
            Command::ToggleAutoplay => self.toggle_autoplay(page),
            Command::ShowTestimonial(_) | Command::ChangeTestimonial(_) => Ok(()),
        }
    }

    /// Autoplay tick. Ticks that arrive after a stop are ignored.
    pub fn on_tick(&mut self, page: &mut dyn Page) -> PageResult<()> {
        if self.autoplay.is_running() {
            self.carousel.change(page, 1)?;
        }
        Ok(())
    }

    fn set_toggle_label(&self, page: &mut dyn Page, running: bool) -> PageResult<()> {
        let Some(toggle) = self.toggle else {
            return Ok(());
        };
        let label = if running {
            &self.pause_label
        } else {
            &self.start_label
        };
        page.set_text(toggle, label)
    }

    pub fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    pub fn current(&self) -> usize {
        self.carousel.current()
    }

    pub fn len(&self) -> usize {
        self.carousel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousel.is_empty()
    }
}
