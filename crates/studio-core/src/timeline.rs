#![forbid(unsafe_code)]

//! Scroll-driven timeline.
//!
//! A vertical fill grows as the timeline's top edge passes the middle of the
//! viewport, reaching 100% once the whole timeline has passed it. Entries are
//! revealed when their top edge rises above 80% of the viewport height, and
//! their node lights up while the top edge sits above the midpoint.

use crate::geometry::{Bounds, Viewport};
use crate::page::{ElementId, EventKind, Page, PageResult, Target};

pub const TIMELINE: &str = ".timeline";
pub const PROGRESS: &str = ".timeline-progress";
pub const ITEMS: &str = ".timeline-item";

const VISIBLE: &str = "visible";
const NODE_ACTIVE: &str = "node-active";
const REVEAL_FRACTION: f64 = 0.8;
const NODE_FRACTION: f64 = 0.5;

/// Fill percentage in `[0, 100]` for a timeline with `bounds`.
///
/// A zero-height timeline yields 0 before the midpoint and 100 after it.
pub fn progress_percent(bounds: Bounds, viewport: Viewport) -> f64 {
    let scroll_distance = viewport.midpoint() - bounds.top;
    let progress = scroll_distance / bounds.height * 100.0;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// Timeline fill and entry tracker.
#[derive(Debug, Clone)]
pub struct TimelineTracker {
    timeline: ElementId,
    progress: ElementId,
    items: Vec<ElementId>,
}

impl TimelineTracker {
    /// Requires both the timeline container and its fill element.
    pub fn mount(page: &mut dyn Page) -> PageResult<Option<Self>> {
        let (Some(timeline), Some(progress)) = (page.query(TIMELINE), page.query(PROGRESS)) else {
            return Ok(None);
        };
        let items = page.query_all(ITEMS);
        page.listen(Target::Window, EventKind::Scroll)?;
        Ok(Some(Self {
            timeline,
            progress,
            items,
        }))
    }

    /// Recompute the fill and entry states.
    pub fn on_scroll(&self, page: &mut dyn Page) -> PageResult<()> {
        let viewport = page.viewport();
        let percent = progress_percent(page.bounding_box(self.timeline), viewport);
        page.set_style(self.progress, "height", &format!("{percent}%"))?;

        for &item in &self.items {
            let bounds = page.bounding_box(item);
            // "visible" is sticky; the node state is only tracked for
            // entries that have been revealed by this pass.
            if bounds.top_above(&viewport, REVEAL_FRACTION) {
                page.add_class(item, VISIBLE)?;
                page.set_class(item, NODE_ACTIVE, bounds.top_above(&viewport, NODE_FRACTION))?;
            }
        }
        Ok(())
    }
}
