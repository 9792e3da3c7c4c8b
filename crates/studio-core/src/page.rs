#![forbid(unsafe_code)]

//! Page adapter capability interface.
//!
//! Components never touch a document directly. They ask a [`Page`] to find
//! elements, flip classes, write text, and arm timers or observers. Anything
//! the host reports back (scrolls, clicks, intersections, timer ticks) arrives
//! as a [`PageEvent`] that the [`Site`](crate::site::Site) routes to the
//! owning component.
//!
//! Lookups return `Option`: missing markup is normal and every component
//! degrades to inactive. Mutations return [`PageResult`] because the host may
//! reject them (detached nodes, a stale handle, a missing browser API).

use core::time::Duration;

use crate::geometry::{Bounds, Viewport};

/// Opaque handle to a page element, issued by the [`Page`] implementation.
///
/// Handles are stable: querying the same element twice yields equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Handle to an armed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Page adapter error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The handle does not refer to an element known to the page.
    UnknownElement(ElementId),
    /// `observe` was called for an observer that was never created.
    UnknownObserver(ObserverKind),
    /// The host rejected the operation.
    Host(String),
    /// The host does not offer this operation.
    Unsupported(&'static str),
}

impl core::fmt::Display for PageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "unknown element handle {}", id.0),
            Self::UnknownObserver(kind) => write!(f, "observer {kind:?} was not created"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for PageError {}

/// Result alias for page mutations.
pub type PageResult<T> = Result<T, PageError>;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The browsing window (scroll events).
    Window,
    /// A specific element.
    Element(ElementId),
}

/// Event types a component can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Document scroll. Reported as [`PageEvent::Scroll`].
    Scroll,
    /// Pointer activation. Reported as [`PageEvent::Click`].
    Click,
    /// Form submission. Reported as [`PageEvent::Submit`].
    ///
    /// When `prevent_default` is set the host cancels the native submission
    /// before the event reaches the site.
    Submit { prevent_default: bool },
}

/// The visibility watchers a site creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObserverKind {
    /// One-shot fade-in reveal.
    Reveal,
    /// Stats region that triggers the counters.
    Counters,
}

/// Intersection watcher configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible, in `[0, 1]`.
    pub threshold: f64,
    /// CSS margin applied to the root box, e.g. `"0px 0px -50px 0px"`.
    pub root_margin: String,
}

/// Deferred work a component asks the host to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Autoplay tick: advance the slideshow by one.
    AdvanceSlide,
    /// One animation frame of the counter ramp.
    CounterFrame,
}

/// Imperative operations exposed to page markup (button handlers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowTestimonial(i64),
    ChangeTestimonial(i64),
    ShowSlide(i64),
    ChangeSlide(i64),
    GoToSlide(i64),
    StartAutoplay,
    StopAutoplay,
    ToggleAutoplay,
}

/// Something the host reports back to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The document scrolled.
    Scroll,
    /// An element with a click listener was activated.
    Click(ElementId),
    /// A form with a submit listener was submitted.
    Submit(ElementId),
    /// An observed element's intersection state changed.
    Intersection {
        observer: ObserverKind,
        target: ElementId,
        is_intersecting: bool,
    },
    /// A timer or frame callback fired.
    Scheduled(Task),
    /// An imperative command from page markup.
    Command(Command),
}

/// Current document location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Path component, e.g. `/portfolio-details.html`.
    pub path: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Create a location from its path and query parts.
    pub fn new(path: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            search: search.into(),
        }
    }
}

/// Capability interface over a rendered page.
///
/// Selectors are CSS selectors. Implementations must at least support
/// descendant combinations of tag, `#id` and `.class` parts, which is all the
/// site uses.
pub trait Page {
    /// First element matching `selector`.
    fn query(&mut self, selector: &str) -> Option<ElementId>;

    /// Every element matching `selector`, in document order.
    fn query_all(&mut self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `scope` matching `selector`.
    fn query_in(&mut self, scope: ElementId, selector: &str) -> Option<ElementId>;

    /// Element with the given `id` attribute.
    fn element_by_id(&mut self, id: &str) -> Option<ElementId> {
        self.query(&format!("#{id}"))
    }

    /// Whether `el` currently carries `class`.
    fn has_class(&self, el: ElementId, class: &str) -> bool;

    /// Add `class` to `el` (idempotent).
    fn add_class(&mut self, el: ElementId, class: &str) -> PageResult<()>;

    /// Remove `class` from `el` (idempotent).
    fn remove_class(&mut self, el: ElementId, class: &str) -> PageResult<()>;

    /// Add or remove `class` depending on `on`.
    fn set_class(&mut self, el: ElementId, class: &str, on: bool) -> PageResult<()> {
        if on {
            self.add_class(el, class)
        } else {
            self.remove_class(el, class)
        }
    }

    /// Flip `class` on `el` and return whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> PageResult<bool> {
        let on = !self.has_class(el, class);
        self.set_class(el, class, on)?;
        Ok(on)
    }

    /// Attribute value, if present.
    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> PageResult<()>;

    /// Replace the element's content with plain text.
    fn set_text(&mut self, el: ElementId, text: &str) -> PageResult<()>;

    /// Set one inline style property.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> PageResult<()>;

    /// Current value of a form control; empty when absent or not a control.
    fn field_value(&self, el: ElementId) -> String;

    /// Restore a form's controls to their initial values.
    fn reset_form(&mut self, form: ElementId) -> PageResult<()>;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> PageResult<ElementId>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> PageResult<()>;

    /// Remove every child of `el`.
    fn clear_children(&mut self, el: ElementId) -> PageResult<()>;

    /// Forget the handle of an element the site no longer references.
    /// The handle is unknown afterwards; releasing twice is a no-op.
    fn release(&mut self, el: ElementId);

    /// Element bounds relative to the viewport.
    fn bounding_box(&self, el: ElementId) -> Bounds;

    /// Current viewport state.
    fn viewport(&self) -> Viewport;

    /// Current document location.
    fn location(&self) -> Location;

    /// Subscribe to `kind` events on `target`.
    ///
    /// Subscribing twice to the same target and kind has no further effect.
    fn listen(&mut self, target: Target, kind: EventKind) -> PageResult<()>;

    /// Create (or replace) the intersection watcher for `kind`.
    fn create_observer(&mut self, kind: ObserverKind, options: ObserverOptions) -> PageResult<()>;

    /// Start watching `el` with the `kind` observer.
    fn observe(&mut self, kind: ObserverKind, el: ElementId) -> PageResult<()>;

    /// Stop watching `el`. Unknown observers or elements are ignored.
    fn unobserve(&mut self, kind: ObserverKind, el: ElementId);

    /// Arm a repeating timer delivering [`PageEvent::Scheduled`] every `period`.
    fn set_interval(&mut self, period: Duration, task: Task) -> PageResult<TimerId>;

    /// Cancel a timer. Cancelling twice, or an unknown timer, is a no-op.
    fn clear_interval(&mut self, timer: TimerId);

    /// Deliver `task` once on the next animation frame.
    fn request_frame(&mut self, task: Task) -> PageResult<()>;

    /// Open `url` in a new browsing context. Returns `false` when the host
    /// refused (e.g. a popup blocker).
    fn open_in_new_context(&mut self, url: &str) -> PageResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_error_display() {
        assert_eq!(
            PageError::UnknownElement(ElementId(7)).to_string(),
            "unknown element handle 7"
        );
        assert_eq!(
            PageError::UnknownObserver(ObserverKind::Reveal).to_string(),
            "observer Reveal was not created"
        );
        assert_eq!(
            PageError::Host("detached".into()).to_string(),
            "host error: detached"
        );
    }

    #[test]
    fn location_new_keeps_parts() {
        let loc = Location::new("/a.html", "?id=x");
        assert_eq!(loc.path, "/a.html");
        assert_eq!(loc.search, "?id=x");
    }
}
