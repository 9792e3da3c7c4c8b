#![forbid(unsafe_code)]

//! Site: mounts every component and routes page events to them.
//!
//! # Lifecycle
//!
//! 1. [`Site::mount`] once the document structure is available. Each
//!    component looks for its markup and stays inactive when it is missing.
//! 2. [`Site::handle`] for every [`PageEvent`] the host delivers.
//!
//! Components never call one another, except that the portfolio gallery
//! registers the cells it renders with the shared reveal observer.
//!
//! # Failure Modes
//!
//! A [`PageError`] raised while mounting leaves that component inactive; one
//! raised while handling an event abandons that event. Both are logged at
//! `warn` and never escape the site.

use crate::carousel::Carousel;
use crate::catalog::Catalog;
use crate::chrome::Chrome;
use crate::config::SiteConfig;
use crate::contact::ContactRedirector;
use crate::counter::CounterAnimator;
use crate::gallery::PortfolioGallery;
use crate::page::{Command, ObserverKind, Page, PageError, PageEvent, PageResult, Task};
use crate::reveal::RevealObserver;
use crate::slideshow::Slideshow;
use crate::timeline::TimelineTracker;

/// All interactive components of one page.
#[derive(Debug)]
pub struct Site {
    chrome: Option<Chrome>,
    timeline: Option<TimelineTracker>,
    reveal: Option<RevealObserver>,
    counters: Option<CounterAnimator>,
    testimonials: Carousel,
    slideshow: Option<Slideshow>,
    contact: Option<ContactRedirector>,
    gallery: Option<PortfolioGallery>,
}

impl Site {
    /// Mount with the built-in catalog.
    pub fn mount(page: &mut dyn Page, config: &SiteConfig) -> Self {
        Self::mount_with_catalog(page, config, &Catalog::builtin())
    }

    /// Mount every component against `page`.
    pub fn mount_with_catalog(page: &mut dyn Page, config: &SiteConfig, catalog: &Catalog) -> Self {
        let chrome = settle("chrome", Chrome::mount(page, config));
        let timeline = settle("timeline", TimelineTracker::mount(page));
        let mut reveal = settle("reveal", RevealObserver::mount(page, config).map(Some));
        let counters = settle("counters", CounterAnimator::mount(page, config));
        let testimonials = settle(
            "testimonials",
            Carousel::mount_testimonials(page).map(Some),
        )
        .unwrap_or_default();
        let slideshow = settle("slideshow", Slideshow::mount(page, config).map(Some));
        let contact = settle("contact", ContactRedirector::mount(page, &config.contact));
        let gallery = settle(
            "gallery",
            PortfolioGallery::mount(page, catalog, reveal.as_mut()),
        );

        Self {
            chrome,
            timeline,
            reveal,
            counters,
            testimonials,
            slideshow,
            contact,
            gallery,
        }
    }

    /// Route one host event.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn handle(&mut self, page: &mut dyn Page, event: PageEvent) {
        let _span = crate::debug_span!("page_event", ?event).entered();
        if let Err(err) = self.dispatch(page, event) {
            crate::warn!(error = %err, "page event abandoned");
        }
    }

    fn dispatch(&mut self, page: &mut dyn Page, event: PageEvent) -> PageResult<()> {
        match event {
            PageEvent::Scroll => {
                if let Some(chrome) = &self.chrome {
                    chrome.update_header(page)?;
                }
                if let Some(timeline) = &self.timeline {
                    timeline.on_scroll(page)?;
                }
            }
            PageEvent::Click(target) => {
                if let Some(chrome) = &self.chrome
                    && chrome.on_click(page, target)?
                {
                    return Ok(());
                }
                if let Some(gallery) = &mut self.gallery {
                    gallery.on_click(page, target, self.reveal.as_mut())?;
                }
            }
            PageEvent::Submit(form) => {
                if let Some(contact) = &self.contact {
                    contact.on_submit(page, form)?;
                }
            }
            PageEvent::Intersection {
                observer,
                target,
                is_intersecting,
            } => match observer {
                ObserverKind::Reveal => {
                    if let Some(reveal) = &mut self.reveal {
                        reveal.on_intersection(page, target, is_intersecting)?;
                    }
                }
                ObserverKind::Counters => {
                    if let Some(counters) = &mut self.counters {
                        counters.on_intersection(page, target, is_intersecting)?;
                    }
                }
            },
            PageEvent::Scheduled(Task::AdvanceSlide) => {
                if let Some(slideshow) = &mut self.slideshow {
                    slideshow.on_tick(page)?;
                }
            }
            PageEvent::Scheduled(Task::CounterFrame) => {
                if let Some(counters) = &mut self.counters {
                    counters.on_frame(page)?;
                }
            }
            PageEvent::Command(command) => self.run_command(page, command)?,
        }
        Ok(())
    }

    fn run_command(&mut self, page: &mut dyn Page, command: Command) -> PageResult<()> {
        match command {
            Command::ShowTestimonial(n) => {
                self.testimonials.show(page, n)?;
            }
            Command::ChangeTestimonial(direction) => {
                self.testimonials.change(page, direction)?;
            }
            slide_command => {
                if let Some(slideshow) = &mut self.slideshow {
                    slideshow.run(page, slide_command)?;
                }
            }
        }
        Ok(())
    }

    pub fn chrome(&self) -> Option<&Chrome> {
        self.chrome.as_ref()
    }

    pub fn timeline(&self) -> Option<&TimelineTracker> {
        self.timeline.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealObserver> {
        self.reveal.as_ref()
    }

    pub fn counters(&self) -> Option<&CounterAnimator> {
        self.counters.as_ref()
    }

    pub fn testimonials(&self) -> &Carousel {
        &self.testimonials
    }

    pub fn slideshow(&self) -> Option<&Slideshow> {
        self.slideshow.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactRedirector> {
        self.contact.as_ref()
    }

    pub fn gallery(&self) -> Option<&PortfolioGallery> {
        self.gallery.as_ref()
    }
}

/// Collapse a mount result: errors are logged and leave the component off.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn settle<T>(component: &'static str, result: Result<Option<T>, PageError>) -> Option<T> {
    match result {
        Ok(Some(mounted)) => {
            crate::debug!(component, "mounted");
            Some(mounted)
        }
        Ok(None) => {
            crate::debug!(component, "markup absent, inactive");
            None
        }
        Err(err) => {
            crate::warn!(component, error = %err, "mount failed, inactive");
            None
        }
    }
}
