#![forbid(unsafe_code)]

//! Animated statistics counters.
//!
//! When the stats region first becomes half visible, every counter ramps
//! from zero to its `data-target` value. Each frame adds a fixed increment of
//! `target / (duration / frame)`, so the ramp is paced by frame count rather
//! than wall-clock time; a slow frame rate stretches the animation. While
//! ramping, counters show the rounded-up current value; the final frame shows
//! the exact target followed by `+`.
//!
//! The trigger is consumed once: the animation never runs a second time
//! during the life of the page.

use crate::config::SiteConfig;
use crate::format::group_thousands;
use crate::page::{ElementId, ObserverKind, Page, PageResult, Task};

pub const STATS: &str = ".stats-section";
pub const COUNTERS: &str = ".counter-number";
pub const TARGET_ATTR: &str = "data-target";

/// Leading integer of `text`, the way `parseInt(text, 10)` reads it:
/// leading whitespace and one sign are accepted, trailing junk is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Frame-stepped ramp for one counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterRamp {
    target: i64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterRamp {
    /// Ramp toward `target` in `steps` equal increments.
    pub fn new(target: i64, steps: f64) -> Self {
        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
            done: false,
        }
    }

    /// Advance one frame and return the text to display, or `None` once the
    /// ramp has finished.
    pub fn step(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current < self.target as f64 {
            Some(group_thousands(self.current.ceil() as i64))
        } else {
            self.done = true;
            Some(format!("{}+", group_thousands(self.target)))
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

/// Stats-region watcher and the counters it drives.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    stats: ElementId,
    counters: Vec<ElementId>,
    steps: f64,
    triggered: bool,
    running: Vec<(ElementId, CounterRamp)>,
}

impl CounterAnimator {
    /// Requires the stats region. Counters are collected now; elements added
    /// later are not animated.
    pub fn mount(page: &mut dyn Page, config: &SiteConfig) -> PageResult<Option<Self>> {
        let Some(stats) = page.query(STATS) else {
            return Ok(None);
        };
        let counters = page.query_all(COUNTERS);
        page.create_observer(ObserverKind::Counters, config.counter_observer())?;
        page.observe(ObserverKind::Counters, stats)?;
        Ok(Some(Self {
            stats,
            counters,
            steps: config.counter_steps(),
            triggered: false,
            running: Vec::new(),
        }))
    }

    /// Start the ramps on the first intersection of the stats region.
    ///
    /// Returns `true` if this call triggered the animation.
    pub fn on_intersection(
        &mut self,
        page: &mut dyn Page,
        target: ElementId,
        is_intersecting: bool,
    ) -> PageResult<bool> {
        if target != self.stats || !is_intersecting || self.triggered {
            return Ok(false);
        }
        self.triggered = true;
        page.unobserve(ObserverKind::Counters, self.stats);
        crate::info!(counters = self.counters.len(), "stats in view, starting counters");

        for &counter in &self.counters {
            let Some(target) = page
                .attribute(counter, TARGET_ATTR)
                .as_deref()
                .and_then(parse_leading_int)
            else {
                crate::debug!(counter = counter.0, "counter without a numeric target");
                continue;
            };
            self.running.push((counter, CounterRamp::new(target, self.steps)));
        }
        // The first step renders synchronously; later ones follow frames.
        self.on_frame(page)?;
        Ok(true)
    }

    /// Advance every unfinished ramp by one frame.
    pub fn on_frame(&mut self, page: &mut dyn Page) -> PageResult<()> {
        for (counter, ramp) in &mut self.running {
            if let Some(text) = ramp.step() {
                page.set_text(*counter, &text)?;
            }
        }
        self.running.retain(|(_, ramp)| !ramp.is_done());
        if !self.running.is_empty() {
            page.request_frame(Task::CounterFrame)?;
        }
        Ok(())
    }

    /// Whether the one-shot trigger has been consumed.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Whether any counter is still ramping.
    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }
}
