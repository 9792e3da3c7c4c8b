#![forbid(unsafe_code)]

//! Browser entry point for the studio website.
//!
//! On `wasm32` this crate binds [`studio_core::Site`] to the live DOM:
//! - boots once the document structure is ready,
//! - turns DOM listeners, intersection observers, intervals and animation
//!   frames into [`studio_core::PageEvent`]s,
//! - exports the imperative commands page markup calls from button handlers
//!   (`changeSlide`, `toggleAutoplay`, ...).
//!
//! Native builds only carry the configuration loader so the workspace checks
//! and tests on every target.

#[cfg(target_arch = "wasm32")]
mod wasm;

use studio_core::SiteConfig;

/// Id of the optional `<script type="application/json">` element holding
/// [`SiteConfig`] overrides.
pub const CONFIG_ELEMENT_ID: &str = "studio-config";

/// Parse the configuration block. A missing or blank block yields the
/// defaults.
pub fn parse_config(text: Option<&str>) -> Result<SiteConfig, serde_json::Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(SiteConfig::default()),
        Some(json) => serde_json::from_str(json),
    }
}
