#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the `tracing` macros the site uses are
//! re-exported here and at the crate root. Without it, macros of the same
//! names expand to nothing, so release wasm builds carry no formatting code
//! for log sites.
//!
//! Call sites use the crate-root path (`crate::debug!`) so they compile
//! identically under both configurations. Arguments are dropped when the
//! feature is off; never compute anything only for a log.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op `debug!`.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `info!`.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op `warn!`.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op `debug_span!`, yielding a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span stand-in when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `tracing::Span::entered`; the span is dropped with the guard.
    pub fn entered(self) -> Self {
        self
    }
}
