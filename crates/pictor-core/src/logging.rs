//! Logging facilities for Pictor.
//!
//! Pictor uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in the application (the `pictor` binary does this with an
//! `EnvFilter` driven by `RUST_LOG`):
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("pictor_fs=debug,pictor=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "pictor_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "pictor_core::signal";
    /// Directory lister target.
    pub const LISTER: &str = "pictor_fs::lister";
    /// Cross-boundary bridge target.
    pub const BRIDGE: &str = "pictor_fs::bridge";
    /// Custom element rendering target.
    pub const ELEMENT: &str = "pictor::element";
    /// Image viewer controller target.
    pub const VIEWER: &str = "pictor::viewer";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "pictor::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
