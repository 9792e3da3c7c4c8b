#![forbid(unsafe_code)]

//! `studio-headless` provides a deterministic, in-memory [`Page`] for the
//! studio site.
//!
//! Design goals:
//! - **Host-driven**: tests build the document, set layout and scroll
//!   positions, and deliver events explicitly.
//! - **Deterministic time**: intervals fire only when the host advances the
//!   [`DeterministicClock`]; frame callbacks fire only when the host steps a
//!   frame.
//! - **Observable**: every side effect the site asks for (listeners,
//!   observers, timers, opened links) is recorded and can be inspected.
//!
//! [`program::HeadlessSite`] pairs a page with a mounted
//! [`Site`](studio_core::Site) and offers a step-based driver.

pub mod program;
pub mod selector;

use core::time::Duration;
use std::collections::{BTreeMap, BTreeSet};

use studio_core::geometry::{Bounds, Viewport};
use studio_core::page::{
    ElementId, EventKind, Location, ObserverKind, ObserverOptions, Page, PageError, PageEvent,
    PageResult, Target, Task, TimerId,
};

use crate::selector::{Compound, Selector};

/// Shortest interval period; a zero period would fire forever in one advance.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    initial_value: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    offset_top: f64,
    height: f64,
}

impl Node {
    fn id_attr(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    fn matches(&self, compound: &Compound) -> bool {
        compound.matches(&self.tag, self.id_attr(), &self.classes)
    }
}

#[derive(Debug, Clone)]
struct Interval {
    period: Duration,
    task: Task,
    next_due: Duration,
}

#[derive(Debug, Clone)]
struct Observer {
    options: ObserverOptions,
    targets: BTreeSet<ElementId>,
}

/// In-memory document implementing [`Page`].
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    nodes: Vec<Node>,
    viewport: Viewport,
    location: Location,
    clock: DeterministicClock,
    listeners: Vec<(Target, EventKind)>,
    observers: BTreeMap<ObserverKind, Observer>,
    timers: BTreeMap<u32, Interval>,
    next_timer: u32,
    frames: Vec<Task>,
    opened: Vec<String>,
    resets: Vec<ElementId>,
    released: BTreeSet<ElementId>,
    block_popups: bool,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// Empty document at `/` with an 800px-high viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_owned(),
                ..Node::default()
            }],
            viewport: Viewport::new(800.0, 0.0),
            location: Location::new("/", ""),
            clock: DeterministicClock::new(),
            listeners: Vec::new(),
            observers: BTreeMap::new(),
            timers: BTreeMap::new(),
            next_timer: 1,
            frames: Vec::new(),
            opened: Vec::new(),
            resets: Vec::new(),
            released: BTreeSet::new(),
            block_popups: false,
        }
    }

    /// Builder: set the document location.
    #[must_use]
    pub fn at(mut self, path: &str, search: &str) -> Self {
        self.location = Location::new(path, search);
        self
    }

    /// The `<body>` element.
    pub const fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Append a new element described by a compound selector
    /// (`"section.stats-section"`, `"input#name"`, `".slide"`) to `parent`.
    /// The tag defaults to `div`.
    ///
    /// # Panics
    ///
    /// Panics when `element` is not a valid compound selector.
    pub fn add(&mut self, parent: ElementId, element: &str) -> ElementId {
        let compound =
            Compound::parse(element).unwrap_or_else(|| panic!("bad element {element:?}"));
        let mut node = Node {
            tag: compound.tag.unwrap_or_else(|| "div".to_owned()),
            classes: compound.classes,
            ..Node::default()
        };
        if let Some(id) = compound.id {
            node.attributes.insert("id".to_owned(), id);
        }
        let id = self.push_node(node);
        self.attach(parent, id);
        id
    }

    /// Set an element's layout: top edge in document coordinates and height.
    pub fn set_layout(&mut self, el: ElementId, offset_top: f64, height: f64) {
        if let Some(node) = self.node_mut(el) {
            node.offset_top = offset_top;
            node.height = height;
        }
    }

    /// Set a form control's current value.
    pub fn set_value(&mut self, el: ElementId, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.value = value.to_owned();
        }
    }

    /// Set a form control's initial value (restored by reset).
    pub fn set_initial_value(&mut self, el: ElementId, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.initial_value = value.to_owned();
            node.value = value.to_owned();
        }
    }

    /// Scroll the document to `y`.
    pub fn set_scroll(&mut self, y: f64) {
        self.viewport.scroll_y = y;
    }

    /// Resize the viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport.height = height;
    }

    /// Make `open_in_new_context` report a blocked popup.
    pub fn block_popups(&mut self, block: bool) {
        self.block_popups = block;
    }

    /// Advance the clock by `dt` and collect every interval tick that fell
    /// due, in firing order.
    pub fn advance_time(&mut self, dt: Duration) -> Vec<PageEvent> {
        self.clock.advance(dt);
        let now = self.clock.now();
        let mut fired = Vec::new();
        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, t)| t.next_due <= now)
                .min_by_key(|(id, t)| (t.next_due, **id))
                .map(|(id, _)| *id);
            let Some(id) = due else { break };
            if let Some(timer) = self.timers.get_mut(&id) {
                fired.push(PageEvent::Scheduled(timer.task));
                timer.next_due += timer.period;
            }
        }
        fired
    }

    /// Take every frame callback requested so far.
    pub fn take_frames(&mut self) -> Vec<PageEvent> {
        self.frames.drain(..).map(PageEvent::Scheduled).collect()
    }

    pub fn clock(&self) -> &DeterministicClock {
        &self.clock
    }

    // --- inspection -------------------------------------------------------

    pub fn classes(&self, el: ElementId) -> Vec<String> {
        self.node(el).map(|n| n.classes.clone()).unwrap_or_default()
    }

    pub fn text(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.text.clone()).unwrap_or_default()
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.tag.as_str())
    }

    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el)?.styles.get(property).map(String::as_str)
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.node(el).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el)?.parent
    }

    /// Whether a listener for `kind` is registered on `target`.
    pub fn is_listening(&self, target: Target, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    /// The `prevent_default` flag of the submit listener on `form`, if any.
    pub fn listens_for_submit(&self, form: ElementId) -> Option<bool> {
        self.listeners.iter().find_map(|(target, kind)| match (target, kind) {
            (Target::Element(el), EventKind::Submit { prevent_default }) if *el == form => {
                Some(*prevent_default)
            }
            _ => None,
        })
    }

    pub fn observer_options(&self, kind: ObserverKind) -> Option<&ObserverOptions> {
        self.observers.get(&kind).map(|o| &o.options)
    }

    pub fn is_observed(&self, kind: ObserverKind, el: ElementId) -> bool {
        self.observers
            .get(&kind)
            .is_some_and(|o| o.targets.contains(&el))
    }

    /// Number of armed intervals.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Period of the armed interval `id`.
    pub fn timer_period(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id.0).map(|t| t.period)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// URLs opened in new browsing contexts, oldest first.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    /// Whether the site released the handle `el`.
    pub fn is_released(&self, el: ElementId) -> bool {
        self.released.contains(&el)
    }

    /// Forms reset so far, oldest first.
    pub fn resets(&self) -> &[ElementId] {
        &self.resets
    }

    pub fn value(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.value.clone()).unwrap_or_default()
    }

    // --- internals --------------------------------------------------------

    fn node(&self, el: ElementId) -> Option<&Node> {
        if self.released.contains(&el) {
            return None;
        }
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        if self.released.contains(&el) {
            return None;
        }
        self.nodes.get_mut(el.0 as usize)
    }

    fn checked_mut(&mut self, el: ElementId) -> PageResult<&mut Node> {
        self.node_mut(el).ok_or(PageError::UnknownElement(el))
    }

    fn push_node(&mut self, node: Node) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old) = self.node_mut(child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.node_mut(old) {
            node.children.retain(|c| *c != child);
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, el: ElementId) -> bool {
        let mut cursor = self.node(el).and_then(|n| n.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).and_then(|n| n.parent);
        }
        false
    }

    /// Elements under `scope` (excluding `scope`) in document order.
    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).iter().rev().copied());
        }
        out
    }

    fn selector_matches(&self, selector: &Selector, el: ElementId) -> bool {
        let Some(node) = self.node(el) else {
            return false;
        };
        if !node.matches(selector.subject()) {
            return false;
        }
        let mut cursor = node.parent;
        for compound in selector.ancestors() {
            loop {
                let Some(current) = cursor else {
                    return false;
                };
                cursor = self.node(current).and_then(|n| n.parent);
                if self.node(current).is_some_and(|n| n.matches(compound)) {
                    break;
                }
            }
        }
        true
    }

    fn select(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(scope)
            .into_iter()
            .filter(|el| self.selector_matches(&selector, *el))
            .collect()
    }
}

impl Page for HeadlessPage {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.select(self.body(), selector).first().copied()
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.select(self.body(), selector)
    }

    fn query_in(&mut self, scope: ElementId, selector: &str) -> Option<ElementId> {
        self.select(scope, selector).first().copied()
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> PageResult<()> {
        let node = self.checked_mut(el)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_owned());
        }
        Ok(())
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> PageResult<()> {
        self.checked_mut(el)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> PageResult<()> {
        self.checked_mut(el)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> PageResult<()> {
        self.checked_mut(el)?.text = text.to_owned();
        self.clear_children(el)
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> PageResult<()> {
        self.checked_mut(el)?
            .styles
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn field_value(&self, el: ElementId) -> String {
        self.value(el)
    }

    fn reset_form(&mut self, form: ElementId) -> PageResult<()> {
        self.checked_mut(form)?;
        for el in self.descendants(form) {
            if let Some(node) = self.node_mut(el) {
                node.value = node.initial_value.clone();
            }
        }
        self.resets.push(form);
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> PageResult<ElementId> {
        if tag.is_empty() {
            return Err(PageError::Host("empty tag name".to_owned()));
        }
        Ok(self.push_node(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        }))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> PageResult<()> {
        self.checked_mut(parent)?;
        self.checked_mut(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(PageError::Host("append would create a cycle".to_owned()));
        }
        self.attach(parent, child);
        Ok(())
    }

    fn clear_children(&mut self, el: ElementId) -> PageResult<()> {
        let children = std::mem::take(&mut self.checked_mut(el)?.children);
        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
        }
        Ok(())
    }

    fn bounding_box(&self, el: ElementId) -> Bounds {
        self.node(el).map_or_else(Bounds::default, |n| {
            Bounds::new(n.offset_top - self.viewport.scroll_y, n.height)
        })
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn location(&self) -> Location {
        self.location.clone()
    }

    fn listen(&mut self, target: Target, kind: EventKind) -> PageResult<()> {
        if let Target::Element(el) = target {
            self.checked_mut(el)?;
        }
        if !self.listeners.contains(&(target, kind)) {
            self.listeners.push((target, kind));
        }
        Ok(())
    }

    fn create_observer(&mut self, kind: ObserverKind, options: ObserverOptions) -> PageResult<()> {
        self.observers.insert(
            kind,
            Observer {
                options,
                targets: BTreeSet::new(),
            },
        );
        Ok(())
    }

    fn observe(&mut self, kind: ObserverKind, el: ElementId) -> PageResult<()> {
        self.checked_mut(el)?;
        let observer = self
            .observers
            .get_mut(&kind)
            .ok_or(PageError::UnknownObserver(kind))?;
        observer.targets.insert(el);
        Ok(())
    }

    fn release(&mut self, el: ElementId) {
        if el == self.body() || el.0 as usize >= self.nodes.len() {
            return;
        }
        self.detach(el);
        for observer in self.observers.values_mut() {
            observer.targets.remove(&el);
        }
        self.released.insert(el);
    }

    fn unobserve(&mut self, kind: ObserverKind, el: ElementId) {
        if let Some(observer) = self.observers.get_mut(&kind) {
            observer.targets.remove(&el);
        }
    }

    fn set_interval(&mut self, period: Duration, task: Task) -> PageResult<TimerId> {
        let id = self.next_timer;
        self.next_timer += 1;
        let period = period.max(MIN_INTERVAL);
        self.timers.insert(
            id,
            Interval {
                period,
                task,
                next_due: self.clock.now() + period,
            },
        );
        Ok(TimerId(id))
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.timers.remove(&timer.0);
    }

    fn request_frame(&mut self, task: Task) -> PageResult<()> {
        self.frames.push(task);
        Ok(())
    }

    fn open_in_new_context(&mut self, url: &str) -> PageResult<bool> {
        if self.block_popups {
            return Ok(false);
        }
        self.opened.push(url.to_owned());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nav_fixture() -> (HeadlessPage, ElementId, Vec<ElementId>) {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let nav = page.add(body, "ul.nav-links");
        let mut links = Vec::new();
        for _ in 0..3 {
            let li = page.add(nav, "li");
            links.push(page.add(li, "a"));
        }
        // A stray link outside the nav.
        page.add(body, "a");
        (page, nav, links)
    }

    #[test]
    fn descendant_query_in_document_order() {
        let (mut page, _, links) = nav_fixture();
        assert_eq!(page.query_all(".nav-links li a"), links);
        assert_eq!(page.query_all("a").len(), 4);
    }

    #[test]
    fn query_in_is_scoped() {
        let (mut page, nav, links) = nav_fixture();
        assert_eq!(page.query_in(nav, "a"), Some(links[0]));
        assert_eq!(page.query_in(links[0], "a"), None);
    }

    #[test]
    fn element_by_id() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let field = page.add(body, "input#email");
        assert_eq!(page.element_by_id("email"), Some(field));
        assert_eq!(page.element_by_id("phone"), None);
    }

    #[test]
    fn detached_elements_are_not_queried() {
        let mut page = HeadlessPage::new();
        let el = page.create_element("div").unwrap();
        page.add_class(el, "fade-in").unwrap();
        assert!(page.query_all(".fade-in").is_empty());
        let body = page.body();
        page.append_child(body, el).unwrap();
        assert_eq!(page.query_all(".fade-in"), vec![el]);
    }

    #[test]
    fn class_ops_are_idempotent() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let el = page.add(body, "div");
        page.add_class(el, "active").unwrap();
        page.add_class(el, "active").unwrap();
        assert_eq!(page.classes(el), vec!["active".to_owned()]);
        assert!(!page.toggle_class(el, "active").unwrap());
        page.remove_class(el, "active").unwrap();
        assert!(page.classes(el).is_empty());
    }

    #[test]
    fn unknown_handles_error() {
        let mut page = HeadlessPage::new();
        let ghost = ElementId(99);
        assert_eq!(
            page.add_class(ghost, "x"),
            Err(PageError::UnknownElement(ghost))
        );
        assert_eq!(
            page.observe(ObserverKind::Reveal, page.body()),
            Err(PageError::UnknownObserver(ObserverKind::Reveal))
        );
    }

    #[test]
    fn append_rejects_cycles() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let outer = page.add(body, "div");
        let inner = page.add(outer, "div");
        assert!(page.append_child(inner, outer).is_err());
        assert!(page.append_child(outer, outer).is_err());
    }

    #[test]
    fn bounding_box_follows_scroll() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let el = page.add(body, "section");
        page.set_layout(el, 1200.0, 300.0);
        assert_eq!(page.bounding_box(el), Bounds::new(1200.0, 300.0));
        page.set_scroll(1000.0);
        assert_eq!(page.bounding_box(el), Bounds::new(200.0, 300.0));
    }

    #[test]
    fn intervals_fire_on_advance() {
        let mut page = HeadlessPage::new();
        let id = page
            .set_interval(Duration::from_millis(100), Task::AdvanceSlide)
            .unwrap();
        assert!(page.advance_time(Duration::from_millis(99)).is_empty());
        assert_eq!(
            page.advance_time(Duration::from_millis(201)),
            vec![PageEvent::Scheduled(Task::AdvanceSlide); 3]
        );
        page.clear_interval(id);
        page.clear_interval(id);
        assert!(page.advance_time(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let form = page.add(body, "form.contact-form");
        let name = page.add(form, "input#name");
        page.set_initial_value(name, "");
        page.set_value(name, "Asha");
        page.reset_form(form).unwrap();
        assert_eq!(page.value(name), "");
        assert_eq!(page.resets(), &[form]);
    }

    #[test]
    fn set_text_replaces_children() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let el = page.add(body, "div");
        let child = page.add(el, "span");
        page.set_text(el, "hello").unwrap();
        assert!(page.children(el).is_empty());
        assert_eq!(page.parent(child), None);
        assert_eq!(page.text(el), "hello");
    }

    #[test]
    fn released_handles_become_unknown() {
        let mut page = HeadlessPage::new();
        let body = page.body();
        let el = page.add(body, "div.fade-in");
        let options = ObserverOptions {
            threshold: 0.1,
            root_margin: "0px".to_owned(),
        };
        page.create_observer(ObserverKind::Reveal, options).unwrap();
        page.observe(ObserverKind::Reveal, el).unwrap();

        page.release(el);
        page.release(el);
        assert!(page.is_released(el));
        assert!(!page.is_observed(ObserverKind::Reveal, el));
        assert!(page.children(body).is_empty());
        assert_eq!(page.add_class(el, "x"), Err(PageError::UnknownElement(el)));

        page.release(body);
        assert!(!page.is_released(body));
    }
}
