//! Display side of Pictor.
//!
//! Pictor browses a directory tree and shows the images in the current
//! directory as a grid of frames. This crate holds everything on the display
//! side of the `fs:dir` boundary:
//!
//! - [`dom`]: the minimal node tree containers hold
//! - [`element`]: attribute-driven custom elements (`img-frame`,
//!   `gryph-icon`, `simple-icon`, `input-text`, `item-container`) and their
//!   registry
//! - [`component`]: the [`Container`](component::Container) and
//!   [`InputText`](component::InputText) components
//! - [`viewer`]: the [`ImageViewer`] controller tying input, listing requests
//!   and containers together
//! - [`config`]: [`ViewerConfig`], loadable from TOML
//!
//! The viewer never touches the filesystem; it lists directories through an
//! injected [`DirectoryService`](pictor_fs::DirectoryService).

pub mod component;
pub mod config;
pub mod dom;
pub mod element;
pub mod viewer;

pub use config::{ConfigError, ResponseOrdering, ViewerConfig};
pub use viewer::{ImageViewer, Settlement, ViewerError};
