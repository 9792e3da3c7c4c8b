#![forbid(unsafe_code)]

//! Site configuration.
//!
//! Every field has a default matching the production site, so an empty JSON
//! object (or no configuration at all) yields the stock behavior. Hosts may
//! override individual values:
//!
//! ```
//! use studio_core::SiteConfig;
//!
//! let cfg: SiteConfig = serde_json::from_str(r#"{ "autoplay_interval_ms": 6000 }"#).unwrap();
//! assert_eq!(cfg.autoplay_interval().as_millis(), 6000);
//! assert_eq!(cfg.scroll_threshold, 50.0);
//! ```

use core::time::Duration;

use serde::Deserialize;

use crate::page::ObserverOptions;

/// Tunables for every component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scroll offset past which the header is drawn in its scrolled state.
    pub scroll_threshold: f64,
    /// Intersection ratio that reveals a `.fade-in` element.
    pub reveal_threshold: f64,
    /// Root margin for the reveal watcher.
    pub reveal_root_margin: String,
    /// Intersection ratio of the stats region that starts the counters.
    pub counter_threshold: f64,
    /// Nominal length of the counter ramp.
    pub counter_duration_ms: u64,
    /// Assumed frame spacing used to size each counter step.
    pub counter_frame_ms: u64,
    /// Slideshow autoplay period.
    pub autoplay_interval_ms: u64,
    /// Toggle label while autoplay runs.
    pub autoplay_pause_label: String,
    /// Toggle label while autoplay is stopped.
    pub autoplay_start_label: String,
    /// Contact deep-link settings.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Options for the reveal watcher.
    pub fn reveal_observer(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.reveal_threshold,
            root_margin: self.reveal_root_margin.clone(),
        }
    }

    /// Options for the stats-region watcher.
    pub fn counter_observer(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.counter_threshold,
            root_margin: "0px".to_owned(),
        }
    }

    /// Autoplay period as a [`Duration`].
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Number of frames the counter ramp is divided into.
    ///
    /// A zero frame length is treated as one millisecond.
    pub fn counter_steps(&self) -> f64 {
        self.counter_duration_ms as f64 / self.counter_frame_ms.max(1) as f64
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_owned(),
            counter_threshold: 0.5,
            counter_duration_ms: 2000,
            counter_frame_ms: 16,
            autoplay_interval_ms: 4000,
            autoplay_pause_label: "⏸ Pause Autoplay".to_owned(),
            autoplay_start_label: "▶ Start Autoplay".to_owned(),
            contact: ContactConfig::default(),
        }
    }
}

/// Where contact enquiries are sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Messaging deep-link host.
    pub host: String,
    /// Destination phone identifier, digits only.
    pub phone: String,
    /// Business name used in the greeting.
    pub business_name: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            host: "wa.me".to_owned(),
            phone: "918341847112".to_owned(),
            business_name: "Pavani Studios".to_owned(),
        }
    }
}
