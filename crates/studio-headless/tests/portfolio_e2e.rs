#![forbid(unsafe_code)]

//! Portfolio detail page: project lookup, tab bar and image grid.

use pretty_assertions::assert_eq;
use studio_core::{Page, SiteConfig};
use studio_core::catalog::{Catalog, Project, Tab};
use studio_core::page::{ElementId, ObserverKind};
use studio_headless::HeadlessPage;
use studio_headless::program::HeadlessSite;

struct Detail {
    title: ElementId,
    category: ElementId,
    tabs: ElementId,
    gallery: ElementId,
}

fn page_for(search: &str) -> (HeadlessPage, Detail) {
    let mut page = HeadlessPage::new().at("/portfolio-details.html", search);
    let body = page.body();
    let title = page.add(body, "h1#project-title");
    let category = page.add(body, "p#project-category");
    let tabs = page.add(body, "div.portfolio-tabs");
    let gallery = page.add(body, "div#gallery-container.gallery-grid");
    (
        page,
        Detail {
            title,
            category,
            tabs,
            gallery,
        },
    )
}

fn open(search: &str) -> (HeadlessSite, Detail) {
    let (page, ids) = page_for(search);
    (HeadlessSite::mount(page, &SiteConfig::default()), ids)
}

fn tab_labels(site: &HeadlessSite, ids: &Detail) -> Vec<String> {
    site.page()
        .children(ids.tabs)
        .iter()
        .map(|&b| site.page().text(b))
        .collect()
}

fn active_tabs(site: &HeadlessSite, ids: &Detail) -> Vec<String> {
    site.page()
        .children(ids.tabs)
        .iter()
        .filter(|&&b| site.page().classes(b).iter().any(|c| c == "active"))
        .filter_map(|&b| site.page().attribute(b, "data-tab"))
        .collect()
}

fn image_sources(site: &HeadlessSite, ids: &Detail) -> Vec<String> {
    site.page()
        .children(ids.gallery)
        .iter()
        .filter_map(|&cell| site.page().children(cell).first().copied())
        .filter_map(|img| site.page().attribute(img, "src"))
        .collect()
}

fn tab_button(site: &HeadlessSite, ids: &Detail, key: &str) -> ElementId {
    site.page()
        .children(ids.tabs)
        .iter()
        .copied()
        .find(|&b| site.page().attribute(b, "data-tab").as_deref() == Some(key))
        .unwrap_or_else(|| panic!("no tab {key:?}"))
}

#[test]
fn known_project_renders_header_tabs_and_first_grid() {
    let (site, ids) = open("?id=ajay-sweety");
    assert_eq!(site.page().text(ids.title), "Ajay weds Sweety");
    assert_eq!(site.page().text(ids.category), "Wedding Photography");
    assert_eq!(
        tab_labels(&site, &ids),
        vec![
            "Engagement",
            "Pre Wedding",
            "Sangeet",
            "Marriage",
            "Reception",
            "Highlights",
            "Videos",
        ]
    );
    assert_eq!(active_tabs(&site, &ids), vec!["engagement"]);
    assert_eq!(
        image_sources(&site, &ids),
        vec![
            "images/portfolio-item-5.jpg",
            "images/portfolio-item-11.jpg",
            "images/portfolio-item-12.jpg",
            "images/portfolio-item-7.jpg",
        ]
    );
    let gallery = site.site().gallery().expect("gallery mounted");
    assert_eq!(gallery.active_tab(), Some("engagement"));
}

#[test]
fn grid_cells_are_fade_in_items_with_alt_text() {
    let (site, ids) = open("?id=ajay-sweety");
    let cells = site.page().children(ids.gallery).to_vec();
    assert_eq!(cells.len(), 4);
    for cell in cells {
        assert_eq!(site.page().tag(cell), Some("div"));
        assert_eq!(
            site.page().classes(cell),
            vec!["gallery-item".to_owned(), "fade-in".to_owned()]
        );
        let img = site.page().children(cell)[0];
        assert_eq!(site.page().tag(img), Some("img"));
        assert_eq!(site.page().attribute(img, "alt").as_deref(), Some("engagement image"));
        assert!(site.page().is_observed(ObserverKind::Reveal, cell));
    }
}

#[test]
fn switching_tabs_replaces_grid() {
    let (mut site, ids) = open("?id=ajay-sweety");
    let sangeet = tab_button(&site, &ids, "sangeet");
    site.click(sangeet);
    assert_eq!(active_tabs(&site, &ids), vec!["sangeet"]);
    assert_eq!(
        image_sources(&site, &ids),
        vec![
            "images/portfolio-item-9.jpg",
            "images/portfolio-user-1.jpg",
            "images/recent-1.jpg",
        ]
    );
}

#[test]
fn empty_tab_shows_note() {
    let (mut site, ids) = open("?id=ajay-sweety");
    let videos = tab_button(&site, &ids, "videos");
    site.click(videos);

    let children = site.page().children(ids.gallery).to_vec();
    assert_eq!(children.len(), 1);
    let note = children[0];
    assert_eq!(site.page().tag(note), Some("p"));
    assert_eq!(site.page().text(note), "No images available for this section.");
    assert_eq!(site.page().style(note, "grid-column"), Some("1 / -1"));
    assert_eq!(site.page().style(note, "text-align"), Some("center"));
}

#[test]
fn repeated_tab_switches_keep_reveal_set_bounded() {
    let (mut site, ids) = open("?id=ajay-sweety");
    let first_cells = site.page().children(ids.gallery).to_vec();
    let pre_wedding = tab_button(&site, &ids, "pre-wedding");
    let engagement = tab_button(&site, &ids, "engagement");

    for _ in 0..10 {
        site.click(pre_wedding);
        site.click(engagement);
        let live = site.page().children(ids.gallery).len();
        assert_eq!(site.site().reveal().map(|r| r.pending()), Some(live));
    }

    for cell in first_cells {
        assert!(site.page().is_released(cell));
        assert!(!site.page().is_observed(ObserverKind::Reveal, cell));
    }
}

#[test]
fn revealed_cells_are_forgotten_on_switch() {
    let (mut site, ids) = open("?id=ajay-sweety");
    let first = site.page().children(ids.gallery)[0];
    site.intersect(ObserverKind::Reveal, first, true);
    assert!(site.site().reveal().is_some_and(|r| r.is_revealed(first)));

    let sangeet = tab_button(&site, &ids, "sangeet");
    site.click(sangeet);
    let reveal = site.site().reveal().expect("reveal mounted");
    assert!(!reveal.is_revealed(first));
    assert_eq!(reveal.pending(), 3);
}

#[test]
fn revealed_cells_fade_in() {
    let (mut site, ids) = open("?id=ajay-sweety");
    let first = site.page().children(ids.gallery)[0];
    site.intersect(ObserverKind::Reveal, first, true);
    assert!(site.page().classes(first).iter().any(|c| c == "visible"));
}

#[test]
fn unknown_project_shows_not_found_only() {
    let (site, ids) = open("?id=does-not-exist");
    assert_eq!(site.page().text(ids.title), "Project Not Found");
    assert_eq!(site.page().text(ids.category), "");
    assert!(site.page().children(ids.tabs).is_empty());
    assert!(site.page().children(ids.gallery).is_empty());
    assert!(site.site().gallery().is_some_and(|g| g.project().is_none()));
}

#[test]
fn missing_id_is_not_found() {
    let (site, ids) = open("");
    assert_eq!(site.page().text(ids.title), "Project Not Found");
}

#[test]
fn encoded_id_is_decoded() {
    let (site, ids) = open("?ref=home&id=rohan%2Dmeera");
    assert_eq!(site.page().text(ids.title), "Rohan & Meera");
    // First tab is empty on this project.
    assert_eq!(
        site.page().text(site.page().children(ids.gallery)[0]),
        "No images available for this section."
    );
}

#[test]
fn anniversary_tabs_use_label_overrides() {
    let (mut site, ids) = open("?id=anniversary-70");
    assert_eq!(
        tab_labels(&site, &ids),
        vec![
            "Father & Mother (70 Years)",
            "Sons & Grandchildren",
            "Sons' Photoshoot",
        ]
    );
    assert_eq!(site.page().children(ids.gallery).len(), 25);
    let sons = tab_button(&site, &ids, "sons-photoshoot");
    site.click(sons);
    assert_eq!(site.page().children(ids.gallery).len(), 13);
}

#[test]
fn custom_catalog() {
    static PROJECTS: &[Project] = &[Project {
        id: "studio-test",
        title: "Studio Test",
        category: "Portraits",
        tabs: &[Tab {
            key: "family-day",
            images: &["a.jpg", "b.jpg"],
        }],
    }];
    let (page, ids) = page_for("?id=studio-test");
    let site = HeadlessSite::mount_with_catalog(
        page,
        &SiteConfig::default(),
        &Catalog::from_static(PROJECTS),
    );
    assert_eq!(tab_labels(&site, &ids), vec!["Family Day"]);
    assert_eq!(image_sources(&site, &ids), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn non_portfolio_pages_skip_the_gallery() {
    let site = HeadlessSite::mount(HeadlessPage::new(), &SiteConfig::default());
    assert!(site.site().gallery().is_none());
}
