#![forbid(unsafe_code)]

//! Header and navigation chrome.
//!
//! The header switches to its compact "scrolled" look once the page scrolls
//! past a threshold, and permanently on every page other than the landing
//! page. On small screens a menu button opens and closes the navigation
//! panel; following a navigation link closes it again.

use crate::config::SiteConfig;
use crate::page::{ElementId, EventKind, Page, PageResult, Target};
use crate::route::is_home_path;

pub const HEADER: &str = ".main-header";
pub const MENU_BUTTON: &str = ".mobile-menu-btn";
pub const NAV_PANEL: &str = ".nav-links";
pub const NAV_LINKS: &str = ".nav-links li a";

const SCROLLED: &str = "scrolled";
const ACTIVE: &str = "active";
const ICON_CLOSED: &str = "fa-bars";
const ICON_OPEN: &str = "fa-times";

/// Whether the header should be drawn in its scrolled state.
pub fn header_scrolled(scroll_y: f64, threshold: f64, is_home: bool) -> bool {
    scroll_y > threshold || !is_home
}

/// Header scroll effect plus the mobile navigation menu.
#[derive(Debug, Clone)]
pub struct Chrome {
    header: Option<ElementId>,
    menu: Option<MobileMenu>,
    is_home: bool,
    threshold: f64,
}

#[derive(Debug, Clone)]
struct MobileMenu {
    button: ElementId,
    panel: ElementId,
    icon: Option<ElementId>,
    links: Vec<ElementId>,
}

impl Chrome {
    /// Wire up the header and menu. Returns `None` when neither exists.
    ///
    /// The header state is applied once immediately so non-home pages start
    /// compact.
    pub fn mount(page: &mut dyn Page, config: &SiteConfig) -> PageResult<Option<Self>> {
        let header = page.query(HEADER);
        let menu = match (page.query(MENU_BUTTON), page.query(NAV_PANEL)) {
            (Some(button), Some(panel)) => Some(MobileMenu {
                button,
                panel,
                icon: page.query_in(button, "i"),
                links: page.query_all(NAV_LINKS),
            }),
            _ => None,
        };
        if header.is_none() && menu.is_none() {
            return Ok(None);
        }

        let chrome = Self {
            header,
            menu,
            is_home: is_home_path(&page.location().path),
            threshold: config.scroll_threshold,
        };

        if chrome.header.is_some() {
            page.listen(Target::Window, EventKind::Scroll)?;
            chrome.update_header(page)?;
        }
        if let Some(menu) = &chrome.menu {
            page.listen(Target::Element(menu.button), EventKind::Click)?;
            for &link in &menu.links {
                page.listen(Target::Element(link), EventKind::Click)?;
            }
        }
        Ok(Some(chrome))
    }

    /// Re-evaluate the header state against the current scroll offset.
    pub fn update_header(&self, page: &mut dyn Page) -> PageResult<()> {
        let Some(header) = self.header else {
            return Ok(());
        };
        let scrolled = header_scrolled(page.viewport().scroll_y, self.threshold, self.is_home);
        page.set_class(header, SCROLLED, scrolled)
    }

    /// Handle a click. Returns `true` when `target` belongs to the chrome.
    pub fn on_click(&self, page: &mut dyn Page, target: ElementId) -> PageResult<bool> {
        let Some(menu) = &self.menu else {
            return Ok(false);
        };
        if target == menu.button {
            page.toggle_class(menu.button, ACTIVE)?;
            let open = page.toggle_class(menu.panel, ACTIVE)?;
            menu.set_icon(page, open)?;
            return Ok(true);
        }
        if menu.links.contains(&target) {
            if page.has_class(menu.panel, ACTIVE) {
                page.remove_class(menu.panel, ACTIVE)?;
                menu.set_icon(page, false)?;
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether the current route is the landing page.
    pub fn is_home(&self) -> bool {
        self.is_home
    }
}

impl MobileMenu {
    fn set_icon(&self, page: &mut dyn Page, open: bool) -> PageResult<()> {
        let Some(icon) = self.icon else {
            return Ok(());
        };
        page.set_class(icon, ICON_CLOSED, !open)?;
        page.set_class(icon, ICON_OPEN, open)
    }
}
