#![forbid(unsafe_code)]

//! Step-based driver for a mounted [`Site`].
//!
//! [`HeadlessSite`] owns a [`HeadlessPage`] and the [`Site`] mounted on it.
//! The test (the host) controls everything that happens:
//!
//! 1. Build the document, then [`HeadlessSite::mount`].
//! 2. Push events via [`HeadlessSite::push_event`] or the helpers
//!    ([`click`](HeadlessSite::click), [`scroll_to`](HeadlessSite::scroll_to),
//!    ...), which push and step in one call.
//! 3. Advance time via [`HeadlessSite::advance_time`]; due interval ticks are
//!    queued and processed on the same call.
//! 4. Run animation frames via [`HeadlessSite::step_frame`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use studio_core::SiteConfig;
//! use studio_headless::HeadlessPage;
//! use studio_headless::program::HeadlessSite;
//!
//! let mut page = HeadlessPage::new();
//! let body = page.body();
//! let show = page.add(body, ".slideshow-container");
//! for _ in 0..3 {
//!     page.add(show, ".slide");
//! }
//!
//! let mut site = HeadlessSite::mount(page, &SiteConfig::default());
//! site.advance_time(Duration::from_millis(4000));
//! assert_eq!(site.site().slideshow().map(|s| s.current()), Some(1));
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use studio_core::catalog::Catalog;
use studio_core::page::{Command, ElementId, ObserverKind, PageEvent};
use studio_core::{Site, SiteConfig};

use crate::HeadlessPage;

/// Frame budget for [`HeadlessSite::run_frames_until_idle`].
const MAX_IDLE_FRAMES: u32 = 100_000;

/// Result of a single [`HeadlessSite::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Frame callbacks still pending after the step.
    pub pending_frames: usize,
}

/// Host-driven site runner over an in-memory page.
#[derive(Debug)]
pub struct HeadlessSite {
    page: HeadlessPage,
    site: Site,
    queue: VecDeque<PageEvent>,
    frame_idx: u64,
}

impl HeadlessSite {
    /// Mount the site with the built-in catalog.
    #[must_use]
    pub fn mount(page: HeadlessPage, config: &SiteConfig) -> Self {
        Self::mount_with_catalog(page, config, &Catalog::builtin())
    }

    /// Mount the site against `page` using `catalog` for portfolio pages.
    #[must_use]
    pub fn mount_with_catalog(
        mut page: HeadlessPage,
        config: &SiteConfig,
        catalog: &Catalog,
    ) -> Self {
        let site = Site::mount_with_catalog(&mut page, config, catalog);
        Self {
            page,
            site,
            queue: VecDeque::new(),
            frame_idx: 0,
        }
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Process every queued event.
    pub fn step(&mut self) -> StepResult {
        let mut events_processed: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            self.site.handle(&mut self.page, event);
        }
        StepResult {
            events_processed,
            pending_frames: self.page.pending_frames(),
        }
    }

    /// Push one event and process the queue.
    pub fn dispatch(&mut self, event: PageEvent) -> StepResult {
        self.push_event(event);
        self.step()
    }

    /// Scroll the document and deliver the scroll event.
    pub fn scroll_to(&mut self, y: f64) -> StepResult {
        self.page.set_scroll(y);
        self.dispatch(PageEvent::Scroll)
    }

    pub fn click(&mut self, el: ElementId) -> StepResult {
        self.dispatch(PageEvent::Click(el))
    }

    pub fn submit(&mut self, form: ElementId) -> StepResult {
        self.dispatch(PageEvent::Submit(form))
    }

    /// Report an intersection change. Like a real observer, nothing is
    /// delivered for elements the observer is not watching.
    pub fn intersect(
        &mut self,
        observer: ObserverKind,
        target: ElementId,
        is_intersecting: bool,
    ) -> StepResult {
        if self.page.is_observed(observer, target) {
            self.push_event(PageEvent::Intersection {
                observer,
                target,
                is_intersecting,
            });
        }
        self.step()
    }

    /// Run an imperative command as page markup would.
    pub fn command(&mut self, command: Command) -> StepResult {
        self.dispatch(PageEvent::Command(command))
    }

    /// Advance the deterministic clock and process every interval tick that
    /// fell due.
    pub fn advance_time(&mut self, dt: Duration) -> StepResult {
        for event in self.page.advance_time(dt) {
            self.push_event(event);
        }
        self.step()
    }

    /// Deliver the frame callbacks requested so far. Callbacks requested while
    /// handling them wait for the next frame.
    pub fn step_frame(&mut self) -> StepResult {
        self.frame_idx += 1;
        for event in self.page.take_frames() {
            self.push_event(event);
        }
        self.step()
    }

    /// Step frames until no callback is pending. Returns the number of frames
    /// run, or `None` if the budget ran out first.
    pub fn run_frames_until_idle(&mut self) -> Option<u32> {
        for frames in 0..MAX_IDLE_FRAMES {
            if self.page.pending_frames() == 0 {
                return Some(frames);
            }
            self.step_frame();
        }
        None
    }

    pub fn page(&self) -> &HeadlessPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut HeadlessPage {
        &mut self.page
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Frames stepped so far.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }
}
