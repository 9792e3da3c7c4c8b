#![forbid(unsafe_code)]

//! One-shot fade-in reveal.
//!
//! Every registered element is watched until the first time it intersects
//! the viewport. It then gets the `visible` class and is dropped from the
//! watcher, so scrolling it out and back in never re-triggers anything.

use std::collections::BTreeSet;

use crate::config::SiteConfig;
use crate::page::{ElementId, ObserverKind, Page, PageResult};

pub const FADE_IN: &str = ".fade-in";

const VISIBLE: &str = "visible";

/// Shared reveal watcher.
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    watching: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
}

impl RevealObserver {
    /// Create the watcher and register every `.fade-in` element on the page.
    pub fn mount(page: &mut dyn Page, config: &SiteConfig) -> PageResult<Self> {
        page.create_observer(ObserverKind::Reveal, config.reveal_observer())?;
        let mut observer = Self::default();
        for el in page.query_all(FADE_IN) {
            observer.register(page, el)?;
        }
        Ok(observer)
    }

    /// Start watching `el`. Already revealed or already watched elements are
    /// left alone.
    pub fn register(&mut self, page: &mut dyn Page, el: ElementId) -> PageResult<()> {
        if self.revealed.contains(&el) || self.watching.contains(&el) {
            return Ok(());
        }
        page.observe(ObserverKind::Reveal, el)?;
        self.watching.insert(el);
        Ok(())
    }

    /// Stop tracking `el` entirely, e.g. because it was removed from the page.
    pub fn forget(&mut self, page: &mut dyn Page, el: ElementId) {
        if self.watching.remove(&el) {
            page.unobserve(ObserverKind::Reveal, el);
        }
        self.revealed.remove(&el);
    }

    /// Handle an intersection report. Returns `true` if `el` was revealed by
    /// this call.
    pub fn on_intersection(
        &mut self,
        page: &mut dyn Page,
        el: ElementId,
        is_intersecting: bool,
    ) -> PageResult<bool> {
        if !is_intersecting || !self.watching.remove(&el) {
            return Ok(false);
        }
        page.unobserve(ObserverKind::Reveal, el);
        self.revealed.insert(el);
        page.add_class(el, VISIBLE)?;
        Ok(true)
    }

    /// Whether `el` is still waiting to be revealed.
    pub fn is_watching(&self, el: ElementId) -> bool {
        self.watching.contains(&el)
    }

    /// Whether `el` has been revealed.
    pub fn is_revealed(&self, el: ElementId) -> bool {
        self.revealed.contains(&el)
    }

    /// Number of elements still being watched.
    pub fn pending(&self) -> usize {
        self.watching.len()
    }
}
