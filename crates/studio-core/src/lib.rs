#![forbid(unsafe_code)]

//! Core: page adapter, site components, project catalog and configuration.
//!
//! Every component talks to the page exclusively through the [`page::Page`]
//! capability trait, so the same logic runs against the browser DOM
//! (`studio-web`) and against the deterministic in-memory page
//! (`studio-headless`).

pub mod carousel;
pub mod catalog;
pub mod chrome;
pub mod config;
pub mod contact;
pub mod counter;
pub mod format;
pub mod gallery;
pub mod geometry;
pub mod logging;
pub mod page;
pub mod reveal;
pub mod route;
pub mod site;
pub mod slideshow;
pub mod timeline;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, warn};

pub use config::SiteConfig;
pub use page::{Command, ElementId, Page, PageError, PageEvent, PageResult};
pub use site::Site;
