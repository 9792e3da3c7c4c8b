#![forbid(unsafe_code)]

//! Timeline fill and entry states against scripted scroll positions.

use pretty_assertions::assert_eq;
use studio_core::SiteConfig;
use studio_core::page::ElementId;
use studio_headless::HeadlessPage;
use studio_headless::program::HeadlessSite;

struct Timeline {
    progress: ElementId,
    items: [ElementId; 2],
}

/// Viewport 800px high; timeline spans document y 1000..2000.
fn mount() -> (HeadlessSite, Timeline) {
    let mut page = HeadlessPage::new();
    let body = page.body();
    let timeline = page.add(body, "section.timeline");
    page.set_layout(timeline, 1000.0, 1000.0);
    let progress = page.add(timeline, ".timeline-progress");
    let first = page.add(timeline, ".timeline-item");
    page.set_layout(first, 1100.0, 200.0);
    let second = page.add(timeline, ".timeline-item");
    page.set_layout(second, 1500.0, 200.0);
    (
        HeadlessSite::mount(page, &SiteConfig::default()),
        Timeline {
            progress,
            items: [first, second],
        },
    )
}

fn has(site: &HeadlessSite, el: ElementId, class: &str) -> bool {
    site.page().classes(el).iter().any(|c| c == class)
}

#[test]
fn fill_tracks_viewport_midpoint() {
    let (mut site, ids) = mount();
    site.scroll_to(0.0);
    assert_eq!(site.page().style(ids.progress, "height"), Some("0%"));
    // top 150, midpoint 400: 250 of 1000.
    site.scroll_to(850.0);
    assert_eq!(site.page().style(ids.progress, "height"), Some("25%"));
    site.scroll_to(5000.0);
    assert_eq!(site.page().style(ids.progress, "height"), Some("100%"));
}

#[test]
fn entries_reveal_and_light_up() {
    let (mut site, ids) = mount();
    let [first, second] = ids.items;

    site.scroll_to(0.0);
    assert!(!has(&site, first, "visible"));

    // first.top = 250: above 640 and above 400.
    // second.top = 650: below 640.
    site.scroll_to(850.0);
    assert!(has(&site, first, "visible"));
    assert!(has(&site, first, "node-active"));
    assert!(!has(&site, second, "visible"));

    // second.top = 500: revealed, node still dark.
    site.scroll_to(1000.0);
    assert!(has(&site, second, "visible"));
    assert!(!has(&site, second, "node-active"));

    // first.top = 450: node goes dark again.
    site.scroll_to(650.0);
    assert!(!has(&site, first, "node-active"));
    assert!(has(&site, first, "visible"));
}

#[test]
fn visibility_is_sticky_when_scrolling_back() {
    let (mut site, ids) = mount();
    let [first, _] = ids.items;
    site.scroll_to(850.0);
    site.scroll_to(0.0);
    assert!(has(&site, first, "visible"));
    // Entries below the reveal line keep their last node state.
    assert!(has(&site, first, "node-active"));
}

#[test]
fn missing_progress_disables_timeline() {
    let mut page = HeadlessPage::new();
    let body = page.body();
    let timeline = page.add(body, ".timeline");
    let item = page.add(timeline, ".timeline-item");
    let mut site = HeadlessSite::mount(page, &SiteConfig::default());
    assert!(site.site().timeline().is_none());
    site.scroll_to(10_000.0);
    assert!(!has(&site, item, "visible"));
}
