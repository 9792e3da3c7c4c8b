#![forbid(unsafe_code)]

//! Fade-in reveals and the stats counters, driven by intersection reports
//! and animation frames.

use pretty_assertions::assert_eq;
use studio_core::{Page, PageEvent, SiteConfig};
use studio_core::page::{ElementId, ObserverKind};
use studio_headless::HeadlessPage;
use studio_headless::program::HeadlessSite;

fn has(site: &HeadlessSite, el: ElementId, class: &str) -> bool {
    site.page().classes(el).iter().any(|c| c == class)
}

// ── Reveal ────────────────────────────────────────────────────────────

fn reveal_page() -> (HeadlessSite, Vec<ElementId>) {
    let mut page = HeadlessPage::new();
    let body = page.body();
    let faders = (0..3).map(|_| page.add(body, "section.fade-in")).collect();
    (HeadlessSite::mount(page, &SiteConfig::default()), faders)
}

#[test]
fn reveal_observer_uses_configured_margin() {
    let (site, faders) = reveal_page();
    let options = site
        .page()
        .observer_options(ObserverKind::Reveal)
        .expect("reveal observer created");
    assert_eq!(options.threshold, 0.1);
    assert_eq!(options.root_margin, "0px 0px -50px 0px");
    for el in faders {
        assert!(site.page().is_observed(ObserverKind::Reveal, el));
    }
}

#[test]
fn reveal_is_one_shot() {
    let (mut site, faders) = reveal_page();
    let el = faders[1];

    site.intersect(ObserverKind::Reveal, el, false);
    assert!(!has(&site, el, "visible"));

    site.intersect(ObserverKind::Reveal, el, true);
    assert!(has(&site, el, "visible"));
    assert!(!site.page().is_observed(ObserverKind::Reveal, el));

    // Leaving the viewport and coming back changes nothing.
    site.intersect(ObserverKind::Reveal, el, false);
    let again = site.intersect(ObserverKind::Reveal, el, true);
    assert_eq!(again.events_processed, 0);
    assert!(has(&site, el, "visible"));

    let reveal = site.site().reveal().expect("reveal mounted");
    assert!(reveal.is_revealed(el));
    assert_eq!(reveal.pending(), 2);
}

#[test]
fn unrevealed_elements_stay_hidden() {
    let (mut site, faders) = reveal_page();
    site.intersect(ObserverKind::Reveal, faders[0], true);
    assert!(!has(&site, faders[2], "visible"));
}

// ── Counters ──────────────────────────────────────────────────────────

struct Stats {
    region: ElementId,
    counters: Vec<ElementId>,
}

fn stats_page(targets: &[&str]) -> (HeadlessSite, Stats) {
    let mut page = HeadlessPage::new();
    let body = page.body();
    let region = page.add(body, "section.stats-section");
    let mut counters = Vec::new();
    for target in targets {
        let counter = page.add(region, "span.counter-number");
        page.set_attribute(counter, "data-target", target).unwrap();
        counters.push(counter);
    }
    (
        HeadlessSite::mount(page, &SiteConfig::default()),
        Stats { region, counters },
    )
}

fn numeric(text: &str) -> i64 {
    text.trim_end_matches('+')
        .replace(',', "")
        .parse()
        .unwrap_or_else(|_| panic!("not a counter value: {text:?}"))
}

#[test]
fn counter_observer_threshold() {
    let (site, stats) = stats_page(&["10"]);
    let options = site
        .page()
        .observer_options(ObserverKind::Counters)
        .expect("counter observer created");
    assert_eq!(options.threshold, 0.5);
    assert!(site.page().is_observed(ObserverKind::Counters, stats.region));
}

#[test]
fn counter_ramps_to_grouped_target_with_plus() {
    let (mut site, stats) = stats_page(&["2500"]);
    let counter = stats.counters[0];
    assert_eq!(site.page().text(counter), "");

    site.intersect(ObserverKind::Counters, stats.region, true);
    // First frame renders synchronously: 2500 / 125 steps.
    assert_eq!(site.page().text(counter), "20");

    let mut seen = vec![numeric(&site.page().text(counter))];
    while site.page().pending_frames() > 0 {
        site.step_frame();
        seen.push(numeric(&site.page().text(counter)));
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "monotonic: {seen:?}");
    assert_eq!(seen.len(), 125);
    assert_eq!(site.page().text(counter), "2,500+");
    assert!(!site.site().counters().is_some_and(|c| c.is_animating()));
}

#[test]
fn counters_finish_together_regardless_of_target() {
    let (mut site, stats) = stats_page(&["250", "1000", "12500"]);
    site.intersect(ObserverKind::Counters, stats.region, true);
    assert_eq!(site.run_frames_until_idle(), Some(124));
    let texts: Vec<String> = stats.counters.iter().map(|&c| site.page().text(c)).collect();
    assert_eq!(texts, vec!["250+", "1,000+", "12,500+"]);
}

#[test]
fn counters_trigger_once() {
    let (mut site, stats) = stats_page(&["300"]);
    site.intersect(ObserverKind::Counters, stats.region, true);
    site.run_frames_until_idle();
    assert!(!site.page().is_observed(ObserverKind::Counters, stats.region));

    // A host that still reports the region must not restart the ramp.
    site.dispatch(PageEvent::Intersection {
        observer: ObserverKind::Counters,
        target: stats.region,
        is_intersecting: true,
    });
    assert_eq!(site.page().pending_frames(), 0);
    assert_eq!(site.page().text(stats.counters[0]), "300+");
}

#[test]
fn not_intersecting_does_not_trigger() {
    let (mut site, stats) = stats_page(&["300"]);
    site.intersect(ObserverKind::Counters, stats.region, false);
    assert_eq!(site.page().text(stats.counters[0]), "");
    assert!(site.site().counters().is_some_and(|c| !c.triggered()));
}

#[test]
fn invalid_target_is_left_alone() {
    let (mut site, stats) = stats_page(&["lots", "40 happy clients"]);
    site.intersect(ObserverKind::Counters, stats.region, true);
    site.run_frames_until_idle();
    assert_eq!(site.page().text(stats.counters[0]), "");
    assert_eq!(site.page().text(stats.counters[1]), "40+");
}
