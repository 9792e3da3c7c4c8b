#![forbid(unsafe_code)]

//! Portfolio case-study gallery.
//!
//! Active on pages that carry the `#project-title` placeholder. The project
//! is chosen by the `id` query parameter and looked up in the [`Catalog`].
//! A known project renders its title, category, one tab control per tab (in
//! catalog order, first one active) and the image grid of the first tab.
//! An unknown id renders a fixed "not found" title and nothing else.
//!
//! Newly rendered grid cells are handed to the [`RevealObserver`] so they fade
//! in like the rest of the page.

use crate::catalog::{Catalog, Project};
use crate::format::tab_label;
use crate::page::{ElementId, EventKind, Page, PageResult, Target};
use crate::reveal::RevealObserver;
use crate::route::query_param;

pub const TITLE_ID: &str = "project-title";
pub const CATEGORY_ID: &str = "project-category";
pub const TABS: &str = ".portfolio-tabs";
pub const GALLERY_ID: &str = "gallery-container";
pub const PROJECT_PARAM: &str = "id";

pub const NOT_FOUND_TITLE: &str = "Project Not Found";
pub const EMPTY_TAB_TEXT: &str = "No images available for this section.";

const TAB_CLASS: &str = "tab-btn";
const ACTIVE: &str = "active";
const CELL_CLASSES: [&str; 2] = ["gallery-item", "fade-in"];
const EMPTY_CLASS: &str = "gallery-empty";

/// The portfolio detail view.
#[derive(Debug, Clone)]
pub struct PortfolioGallery {
    project: Option<&'static Project>,
    gallery: Option<ElementId>,
    tabs: Vec<(ElementId, &'static str)>,
    active_tab: Option<&'static str>,
    /// Elements created for the current grid contents.
    rendered: Vec<ElementId>,
}

impl PortfolioGallery {
    /// Render the project named by the query string. Returns `None` when the
    /// page has no title placeholder.
    pub fn mount(
        page: &mut dyn Page,
        catalog: &Catalog,
        reveal: Option<&mut RevealObserver>,
    ) -> PageResult<Option<Self>> {
        let Some(title) = page.element_by_id(TITLE_ID) else {
            return Ok(None);
        };
        let requested = query_param(&page.location().search, PROJECT_PARAM);
        let Some(project) = requested.as_deref().and_then(|id| catalog.get(id)) else {
            crate::warn!(id = ?requested, "unknown portfolio project");
            page.set_text(title, NOT_FOUND_TITLE)?;
            return Ok(Some(Self {
                project: None,
                gallery: None,
                tabs: Vec::new(),
                active_tab: None,
                rendered: Vec::new(),
            }));
        };

        page.set_text(title, project.title)?;
        if let Some(category) = page.element_by_id(CATEGORY_ID) {
            page.set_text(category, project.category)?;
        }

        let mut view = Self {
            project: Some(project),
            gallery: page.element_by_id(GALLERY_ID),
            tabs: Vec::new(),
            active_tab: None,
            rendered: Vec::new(),
        };
        if let Some(container) = page.query(TABS) {
            view.render_tabs(page, container, project)?;
        }
        if let Some(first) = project.first_tab() {
            view.load(page, first.key, reveal)?;
        }
        Ok(Some(view))
    }

    fn render_tabs(
        &mut self,
        page: &mut dyn Page,
        container: ElementId,
        project: &'static Project,
    ) -> PageResult<()> {
        page.clear_children(container)?;
        for (index, tab) in project.tabs.iter().enumerate() {
            let button = page.create_element("button")?;
            page.add_class(button, TAB_CLASS)?;
            if index == 0 {
                page.add_class(button, ACTIVE)?;
            }
            page.set_attribute(button, "data-tab", tab.key)?;
            page.set_text(button, &tab_label(tab.key))?;
            page.listen(Target::Element(button), EventKind::Click)?;
            page.append_child(container, button)?;
            self.tabs.push((button, tab.key));
        }
        Ok(())
    }

    /// Handle a click. Returns `true` when `target` is one of the tab controls.
    pub fn on_click(
        &mut self,
        page: &mut dyn Page,
        target: ElementId,
        reveal: Option<&mut RevealObserver>,
    ) -> PageResult<bool> {
        let Some(&(_, key)) = self.tabs.iter().find(|(button, _)| *button == target) else {
            return Ok(false);
        };
        for &(button, _) in &self.tabs {
            page.remove_class(button, ACTIVE)?;
        }
        page.add_class(target, ACTIVE)?;
        self.load(page, key, reveal)?;
        Ok(true)
    }

    /// Replace the grid with the images of tab `key`.
    pub fn load(
        &mut self,
        page: &mut dyn Page,
        key: &'static str,
        mut reveal: Option<&mut RevealObserver>,
    ) -> PageResult<()> {
        let (Some(project), Some(gallery)) = (self.project, self.gallery) else {
            return Ok(());
        };
        self.active_tab = Some(key);
        let stale = std::mem::take(&mut self.rendered);
        if let Some(reveal) = reveal.as_deref_mut() {
            for &el in &stale {
                reveal.forget(page, el);
            }
        }
        page.clear_children(gallery)?;
        for el in stale {
            page.release(el);
        }

        let images = project.images(key);
        if images.is_empty() {
            let note = page.create_element("p")?;
            self.rendered.push(note);
            page.add_class(note, EMPTY_CLASS)?;
            page.set_style(note, "grid-column", "1 / -1")?;
            page.set_style(note, "text-align", "center")?;
            page.set_style(note, "color", "#777")?;
            page.set_text(note, EMPTY_TAB_TEXT)?;
            return page.append_child(gallery, note);
        }

        let alt = format!("{key} image");
        for src in images {
            let cell = page.create_element("div")?;
            self.rendered.push(cell);
            for class in CELL_CLASSES {
                page.add_class(cell, class)?;
            }
            let img = page.create_element("img")?;
            self.rendered.push(img);
            page.set_attribute(img, "src", src)?;
            page.set_attribute(img, "alt", &alt)?;
            page.append_child(cell, img)?;
            page.append_child(gallery, cell)?;
            if let Some(reveal) = reveal.as_deref_mut() {
                reveal.register(page, cell)?;
            }
        }
        Ok(())
    }

    /// The project being shown, if the id was known.
    pub fn project(&self) -> Option<&'static Project> {
        self.project
    }

    /// Key of the tab currently rendered in the grid.
    pub fn active_tab(&self) -> Option<&'static str> {
        self.active_tab
    }

    /// Tab controls and their keys, in render order.
    pub fn tabs(&self) -> &[(ElementId, &'static str)] {
        &self.tabs
    }
}
