//! Core systems for Pictor.
//!
//! This crate provides the foundational pieces shared by both halves of the
//! image browser:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Reactive values with change detection
//! - **Logging**: `tracing` targets and timing spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use pictor_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
