#![forbid(unsafe_code)]

use core::time::Duration;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use studio_core::geometry::{Bounds, Viewport};
use studio_core::page::{
    Command, ElementId, EventKind, Location, ObserverKind, ObserverOptions, Page, PageError,
    PageEvent, PageResult, Target, Task, TimerId,
};
use studio_core::{Site, SiteConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window, console,
};

use crate::{CONFIG_ELEMENT_ID, parse_config};

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
    /// Commands issued by markup before the site booted.
    static PENDING: RefCell<Vec<Command>> = const { RefCell::new(Vec::new()) };
}

fn host_err(err: JsValue) -> PageError {
    PageError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Something a DOM callback reports. Intersection targets arrive as raw
/// elements and are resolved to handles once the page is borrowed.
enum HostEvent {
    Page(PageEvent),
    Intersection {
        observer: ObserverKind,
        target: Element,
        is_intersecting: bool,
    },
}

fn deliver(host: &Weak<Host>, event: HostEvent) {
    if let Some(host) = host.upgrade() {
        host.deliver(event);
    }
}

// ---------------------------------------------------------------------------
// Host: the mounted site plus its event queue
// ---------------------------------------------------------------------------

struct Runtime {
    page: DomPage,
    site: Site,
}

impl Runtime {
    fn handle(&mut self, event: HostEvent) {
        let event = match event {
            HostEvent::Page(event) => event,
            HostEvent::Intersection {
                observer,
                target,
                is_intersecting,
            } => PageEvent::Intersection {
                observer,
                target: self.page.register(target),
                is_intersecting,
            },
        };
        self.site.handle(&mut self.page, event);
    }
}

struct Host {
    runtime: RefCell<Runtime>,
    queue: RefCell<VecDeque<HostEvent>>,
}

impl Host {
    fn deliver(&self, event: HostEvent) {
        self.queue.borrow_mut().push_back(event);
        self.pump();
    }

    /// Drain the queue. A nested call (a callback fired while the site is
    /// handling an event) leaves its event for the outer pump.
    fn pump(&self) {
        let Ok(mut runtime) = self.runtime.try_borrow_mut() else {
            return;
        };
        runtime.page.retired.clear();
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            runtime.handle(event);
        }
    }
}

// ---------------------------------------------------------------------------
// DomPage: the Page adapter over web-sys
// ---------------------------------------------------------------------------

struct Interval {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

struct Watcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

struct DomPage {
    window: Window,
    document: Document,
    host: Weak<Host>,
    /// Live handles. Released handles are never reissued.
    elements: BTreeMap<u32, Element>,
    /// Element → handle, so lookups do not scan `elements`.
    handles: js_sys::WeakMap,
    next_handle: u32,
    listeners: Vec<(Target, EventKind)>,
    listener_callbacks: Vec<Closure<dyn FnMut(Event)>>,
    watchers: BTreeMap<ObserverKind, Watcher>,
    intervals: BTreeMap<u32, Interval>,
    next_timer: u32,
    /// Cleared interval callbacks, dropped at the start of the next pump so a
    /// callback is never freed while it is on the stack.
    retired: Vec<Closure<dyn FnMut()>>,
}

impl DomPage {
    fn new(window: Window, document: Document, host: Weak<Host>) -> Self {
        Self {
            window,
            document,
            host,
            elements: BTreeMap::new(),
            handles: js_sys::WeakMap::new(),
            next_handle: 0,
            listeners: Vec::new(),
            listener_callbacks: Vec::new(),
            watchers: BTreeMap::new(),
            intervals: BTreeMap::new(),
            next_timer: 1,
            retired: Vec::new(),
        }
    }

    /// Handle for `el`, issuing a new one the first time it is seen.
    fn register(&mut self, el: Element) -> ElementId {
        if let Some(id) = self.handles.get(&el).as_f64() {
            return ElementId(id as u32);
        }
        let id = self.next_handle;
        self.next_handle += 1;
        self.handles.set(&el, &JsValue::from_f64(f64::from(id)));
        self.elements.insert(id, el);
        ElementId(id)
    }

    fn element(&self, el: ElementId) -> PageResult<&Element> {
        self.elements
            .get(&el.0)
            .ok_or(PageError::UnknownElement(el))
    }

    fn collect(&mut self, list: Result<web_sys::NodeList, JsValue>) -> Vec<ElementId> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.register(el))
            .collect()
    }
}

impl Page for DomPage {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        let el = self.document.query_selector(selector).ok().flatten()?;
        Some(self.register(el))
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = self.document.query_selector_all(selector);
        self.collect(list)
    }

    fn query_in(&mut self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let el = self.element(scope).ok()?.query_selector(selector).ok().flatten()?;
        Some(self.register(el))
    }

    fn element_by_id(&mut self, id: &str) -> Option<ElementId> {
        let el = self.document.get_element_by_id(id)?;
        Some(self.register(el))
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el)
            .is_ok_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> PageResult<()> {
        self.element(el)?.class_list().add_1(class).map_err(host_err)
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> PageResult<()> {
        self.element(el)?.class_list().remove_1(class).map_err(host_err)
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el).ok()?.get_attribute(name)
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> PageResult<()> {
        self.element(el)?.set_attribute(name, value).map_err(host_err)
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> PageResult<()> {
        self.element(el)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> PageResult<()> {
        let el = self
            .element(el)?
            .dyn_ref::<HtmlElement>()
            .ok_or(PageError::Unsupported("inline style on a non-HTML element"))?;
        el.style().set_property(property, value).map_err(host_err)
    }

    fn field_value(&self, el: ElementId) -> String {
        let Ok(el) = self.element(el) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn reset_form(&mut self, form: ElementId) -> PageResult<()> {
        self.element(form)?
            .dyn_ref::<HtmlFormElement>()
            .ok_or(PageError::Unsupported("reset on a non-form element"))?
            .reset();
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> PageResult<ElementId> {
        let el = self.document.create_element(tag).map_err(host_err)?;
        Ok(self.register(el))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> PageResult<()> {
        let child = self.element(child)?;
        self.element(parent)?
            .append_child(child)
            .map(drop)
            .map_err(host_err)
    }

    fn clear_children(&mut self, el: ElementId) -> PageResult<()> {
        self.element(el)?.set_text_content(None);
        Ok(())
    }

    fn bounding_box(&self, el: ElementId) -> Bounds {
        self.element(el).map_or_else(
            |_| Bounds::default(),
            |el| {
                let rect = el.get_bounding_client_rect();
                Bounds::new(rect.top(), rect.height())
            },
        )
    }

    fn viewport(&self) -> Viewport {
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        Viewport::new(height, scroll_y)
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location::new(
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }

    fn listen(&mut self, target: Target, kind: EventKind) -> PageResult<()> {
        if self.listeners.contains(&(target, kind)) {
            return Ok(());
        }
        let (event_target, id): (web_sys::EventTarget, Option<ElementId>) = match target {
            Target::Window => (self.window.clone().into(), None),
            Target::Element(el) => (self.element(el)?.clone().into(), Some(el)),
        };
        let (name, event) = match (kind, id) {
            (EventKind::Scroll, _) => ("scroll", PageEvent::Scroll),
            (EventKind::Click, Some(el)) => ("click", PageEvent::Click(el)),
            (EventKind::Submit { .. }, Some(el)) => ("submit", PageEvent::Submit(el)),
            _ => return Err(PageError::Unsupported("click and submit need an element")),
        };
        let prevent_default = matches!(
            kind,
            EventKind::Submit {
                prevent_default: true
            }
        );

        let host = self.host.clone();
        let callback = Closure::wrap(Box::new(move |e: Event| {
            if prevent_default {
                e.prevent_default();
            }
            deliver(&host, HostEvent::Page(event));
        }) as Box<dyn FnMut(Event)>);
        event_target
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            .map_err(host_err)?;
        self.listener_callbacks.push(callback);
        self.listeners.push((target, kind));
        Ok(())
    }

    fn create_observer(&mut self, kind: ObserverKind, options: ObserverOptions) -> PageResult<()> {
        let host = self.host.clone();
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                deliver(
                    &host,
                    HostEvent::Intersection {
                        observer: kind,
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    },
                );
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(host_err)?;

        if let Some(previous) = self.watchers.insert(
            kind,
            Watcher {
                observer,
                _callback: callback,
            },
        ) {
            previous.observer.disconnect();
        }
        Ok(())
    }

    fn observe(&mut self, kind: ObserverKind, el: ElementId) -> PageResult<()> {
        let el = self.element(el)?;
        let watcher = self
            .watchers
            .get(&kind)
            .ok_or(PageError::UnknownObserver(kind))?;
        watcher.observer.observe(el);
        Ok(())
    }

    fn release(&mut self, el: ElementId) {
        if let Some(element) = self.elements.remove(&el.0) {
            for watcher in self.watchers.values() {
                watcher.observer.unobserve(&element);
            }
            self.handles.delete(&element);
        }
    }

    fn unobserve(&mut self, kind: ObserverKind, el: ElementId) {
        if let (Some(watcher), Ok(el)) = (self.watchers.get(&kind), self.element(el)) {
            watcher.observer.unobserve(el);
        }
    }

    fn set_interval(&mut self, period: Duration, task: Task) -> PageResult<TimerId> {
        let host = self.host.clone();
        let callback = Closure::wrap(Box::new(move || {
            deliver(&host, HostEvent::Page(PageEvent::Scheduled(task)));
        }) as Box<dyn FnMut()>);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(host_err)?;

        let id = self.next_timer;
        self.next_timer += 1;
        self.intervals.insert(id, Interval { handle, callback });
        Ok(TimerId(id))
    }

    fn clear_interval(&mut self, timer: TimerId) {
        if let Some(interval) = self.intervals.remove(&timer.0) {
            self.window.clear_interval_with_handle(interval.handle);
            self.retired.push(interval.callback);
        }
    }

    fn request_frame(&mut self, task: Task) -> PageResult<()> {
        let host = self.host.clone();
        let callback = Closure::once_into_js(move || {
            deliver(&host, HostEvent::Page(PageEvent::Scheduled(task)));
        });
        self.window
            .request_animation_frame(callback.unchecked_ref())
            .map(drop)
            .map_err(host_err)
    }

    fn open_in_new_context(&mut self, url: &str) -> PageResult<bool> {
        self.window
            .open_with_url_and_target(url, "_blank")
            .map(|opened| opened.is_some())
            .map_err(host_err)
    }
}

// ---------------------------------------------------------------------------
// Boot and exported commands
// ---------------------------------------------------------------------------

fn load_config(document: &Document) -> SiteConfig {
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    parse_config(text.as_deref()).unwrap_or_else(|err| {
        console::warn_1(&format!("#{CONFIG_ELEMENT_ID} ignored: {err}").into());
        SiteConfig::default()
    })
}

fn boot(window: Window, document: Document) {
    let config = load_config(&document);
    let host = Rc::new_cyclic(|weak: &Weak<Host>| {
        let mut page = DomPage::new(window, document, weak.clone());
        let site = Site::mount(&mut page, &config);
        Host {
            runtime: RefCell::new(Runtime { page, site }),
            queue: RefCell::new(VecDeque::new()),
        }
    });
    HOST.with(|slot| *slot.borrow_mut() = Some(host.clone()));

    let pending = PENDING.with(|queue| std::mem::take(&mut *queue.borrow_mut()));
    for command in pending {
        host.deliver(HostEvent::Page(PageEvent::Command(command)));
    }
}

/// Module entry point: mount once the document structure is available.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        boot(window, document);
        return Ok(());
    }
    let target = document.clone();
    let on_ready = Closure::once_into_js(move || boot(window, document));
    target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn run(command: Command) {
    let host = HOST.with(|slot| slot.borrow().clone());
    match host {
        Some(host) => host.deliver(HostEvent::Page(PageEvent::Command(command))),
        None => PENDING.with(|queue| queue.borrow_mut().push(command)),
    }
}

#[wasm_bindgen(js_name = showTestimonial)]
pub fn show_testimonial(n: i32) {
    run(Command::ShowTestimonial(n.into()));
}

#[wasm_bindgen(js_name = changeTestimonial)]
pub fn change_testimonial(direction: i32) {
    run(Command::ChangeTestimonial(direction.into()));
}

#[wasm_bindgen(js_name = showSlide)]
pub fn show_slide(n: i32) {
    run(Command::ShowSlide(n.into()));
}

#[wasm_bindgen(js_name = changeSlide)]
pub fn change_slide(direction: i32) {
    run(Command::ChangeSlide(direction.into()));
}

#[wasm_bindgen(js_name = goToSlide)]
pub fn go_to_slide(n: i32) {
    run(Command::GoToSlide(n.into()));
}

#[wasm_bindgen(js_name = startAutoplay)]
pub fn start_autoplay() {
    run(Command::StartAutoplay);
}

#[wasm_bindgen(js_name = stopAutoplay)]
pub fn stop_autoplay() {
    run(Command::StopAutoplay);
}

#[wasm_bindgen(js_name = toggleAutoplay)]
pub fn toggle_autoplay() {
    run(Command::ToggleAutoplay);
}
