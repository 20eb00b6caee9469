//! The image viewer controller.
//!
//! [`ImageViewer`] owns the path input and two containers: one listing the
//! subdirectories of the current path, one showing an `img-frame` for every
//! image file in it. Each change notification from the input clears both
//! containers and starts one listing request on the tokio runtime; the
//! containers are filled when that request settles.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pictor::{ImageViewer, ViewerConfig};
//! use pictor_fs::{Bridge, DirectoryLister};
//!
//! let client = Bridge::spawn(Arc::new(DirectoryLister::default()));
//! let viewer = ImageViewer::new(Arc::new(client), ViewerConfig::default())?;
//! viewer.settled.connect(|settlement| println!("{settlement:?}"));
//! viewer.start();
//! viewer.input().set_text("/srv/photos");
//! ```
//!
//! # Overlapping requests
//!
//! Requests are never cancelled and may settle in any order. With
//! [`ResponseOrdering::LatestRequest`] each request is tagged with a
//! generation number and only the newest generation is rendered. With
//! [`ResponseOrdering::LastResponse`] every successful response is rendered
//! when it arrives, including a slow response to an old path. Rendering
//! replaces the containers' children, so whichever response arrives last is
//! what the containers show, even if it answers a superseded path.
//!
//! # Signals
//!
//! - `settled(Settlement)`: Emitted once per request, after the containers
//!   have been updated (or left alone)
//!
//! The containers' own `children_changed` signals fire while the viewer holds
//! its generation lock; slots connected to them must not call back into the
//! viewer.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};

use pictor_core::logging::targets;
use pictor_core::{PerfSpan, Signal};
use pictor_fs::{DirectoryService, Listing, ServiceError};

use crate::component::{Container, InputText};
use crate::config::{ResponseOrdering, ViewerConfig};
use crate::dom::Node;
use crate::element::{Element, ElementError, ElementRegistry, ImgFrame};

/// Errors constructing an [`ImageViewer`].
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The viewer was created outside a tokio runtime.
    #[error("image viewer needs a tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),
    /// An element the viewer renders is not defined in its registry.
    #[error(transparent)]
    Element(#[from] ElementError),
}

/// How a listing request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The listing was rendered into the containers.
    Applied {
        generation: u64,
        path: String,
        directories: usize,
        images: usize,
    },
    /// The listing answered a superseded request and was dropped.
    DiscardedStale {
        generation: u64,
        latest: u64,
        path: String,
    },
    /// The request itself failed; the containers were not touched.
    Failed {
        generation: u64,
        path: String,
        error: String,
    },
}

impl Settlement {
    /// Generation number of the request this settles.
    pub fn generation(&self) -> u64 {
        match self {
            Settlement::Applied { generation, .. }
            | Settlement::DiscardedStale { generation, .. }
            | Settlement::Failed { generation, .. } => *generation,
        }
    }

    /// Path the request listed.
    pub fn path(&self) -> &str {
        match self {
            Settlement::Applied { path, .. }
            | Settlement::DiscardedStale { path, .. }
            | Settlement::Failed { path, .. } => path,
        }
    }
}

/// Top-level controller of the image browser.
pub struct ImageViewer {
    service: Arc<dyn DirectoryService>,
    runtime: Handle,
    config: ViewerConfig,

    /// Creates the `img-frame` elements.
    elements: ElementRegistry,

    /// Path input.
    input: InputText,

    /// One `<p>` per subdirectory.
    directory_items: Container,

    /// One `img-frame` per image file.
    image_items: Container,

    /// Generation of the most recent request. The containers are only
    /// mutated while this is locked.
    latest: Mutex<u64>,

    /// Signal emitted when a request settles.
    pub settled: Signal<Settlement>,
}

impl ImageViewer {
    /// Create a viewer on the current tokio runtime.
    pub fn new(
        service: Arc<dyn DirectoryService>,
        config: ViewerConfig,
    ) -> Result<Arc<Self>, ViewerError> {
        let runtime = Handle::try_current()?;
        Self::with_runtime(service, config, runtime)
    }

    /// Create a viewer that spawns its requests on `runtime`.
    pub fn with_runtime(
        service: Arc<dyn DirectoryService>,
        config: ViewerConfig,
        runtime: Handle,
    ) -> Result<Arc<Self>, ViewerError> {
        let elements = ElementRegistry::with_builtin_elements()?;
        Self::with_elements(service, config, runtime, elements)
    }

    /// Create a viewer that creates its elements through `elements`.
    ///
    /// Fails if `img-frame` is not defined in the registry.
    pub fn with_elements(
        service: Arc<dyn DirectoryService>,
        config: ViewerConfig,
        runtime: Handle,
        elements: ElementRegistry,
    ) -> Result<Arc<Self>, ViewerError> {
        if !elements.is_defined(ImgFrame::TAG_NAME) {
            return Err(ElementError::Undefined(ImgFrame::TAG_NAME.to_string()).into());
        }

        Ok(Arc::new_cyclic(|weak: &Weak<Self>| {
            let input = InputText::new();
            let weak = weak.clone();
            input.on_change(move |path| {
                if let Some(viewer) = weak.upgrade() {
                    viewer.request_listing(path.clone());
                }
            });

            let image_items = Container::new();
            image_items.set_direction("row");
            let directory_items = Container::new();
            directory_items.set_direction("column");

            Self {
                service,
                runtime,
                config,
                elements,
                input,
                directory_items,
                image_items,
                latest: Mutex::new(0),
                settled: Signal::new(),
            }
        }))
    }

    /// Fire the seed path through the input.
    pub fn start(&self) {
        tracing::info!(target: targets::VIEWER, seed = %self.config.seed_path, "starting image viewer");
        self.input.set_text(self.config.seed_path.clone());
    }

    /// The path input.
    pub fn input(&self) -> &InputText {
        &self.input
    }

    /// The container of subdirectory entries.
    pub fn directory_items(&self) -> &Container {
        &self.directory_items
    }

    /// The container of image frames.
    pub fn image_items(&self) -> &Container {
        &self.image_items
    }

    /// The viewer configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Generation number of the most recent request; 0 before the first.
    pub fn latest_generation(&self) -> u64 {
        *self.latest.lock()
    }

    /// Text of every directory entry, in display order.
    pub fn directories(&self) -> Vec<String> {
        self.directory_items
            .with_children(|nodes| nodes.iter().map(Node::text_content).collect())
    }

    /// `url` of every image frame, in display order.
    pub fn image_urls(&self) -> Vec<String> {
        self.image_items.with_children(|nodes| {
            nodes
                .iter()
                .filter_map(|node| node.attribute("url").map(str::to_string))
                .collect()
        })
    }

    fn request_listing(self: &Arc<Self>, path: String) {
        let generation = {
            let mut latest = self.latest.lock();
            *latest += 1;
            self.directory_items.clear();
            self.image_items.clear();
            *latest
        };
        tracing::debug!(target: targets::VIEWER, generation, path = %path, "listing requested");

        let viewer = Arc::clone(self);
        self.runtime.spawn(async move {
            let result = viewer.service.list(&path).await;
            viewer.settle(generation, path, result);
        });
    }

    fn settle(&self, generation: u64, path: String, result: Result<Listing, ServiceError>) {
        let settlement = {
            let latest = self.latest.lock();
            let stale = generation != *latest;
            match result {
                Err(err) => {
                    tracing::error!(target: targets::VIEWER, generation, path = %path, error = %err, "listing request failed");
                    Settlement::Failed {
                        generation,
                        path,
                        error: err.to_string(),
                    }
                }
                Ok(_) if stale && self.config.response_ordering == ResponseOrdering::LatestRequest => {
                    tracing::debug!(target: targets::VIEWER, generation, latest = *latest, "discarding stale listing");
                    Settlement::DiscardedStale {
                        generation,
                        latest: *latest,
                        path,
                    }
                }
                Ok(listing) => {
                    if stale {
                        tracing::debug!(target: targets::VIEWER, generation, latest = *latest, "rendering listing of a superseded request");
                    }
                    let (directories, images) = self.render(&listing);
                    Settlement::Applied {
                        generation,
                        path,
                        directories,
                        images,
                    }
                }
            }
        };
        self.settled.emit(settlement);
    }

    /// Replaces both containers' children with the listing.
    fn render(&self, listing: &Listing) -> (usize, usize) {
        let _perf = PerfSpan::new("viewer.render");

        let mut directories = Vec::new();
        let mut images = Vec::new();
        for entry in listing {
            let filename = normalize_separators(&entry.filename);
            if entry.is_directory {
                directories.push(Node::paragraph(filename));
            } else if entry.is_file && self.config.is_image(&filename) {
                match self.elements.create(ImgFrame::TAG_NAME) {
                    Ok(mut frame) => {
                        frame.set_attribute("url", &filename);
                        images.push(Node::Custom(frame));
                    }
                    Err(err) => {
                        tracing::error!(target: targets::VIEWER, error = %err, "cannot create image frame");
                    }
                }
            }
        }

        let counts = (directories.len(), images.len());
        self.directory_items.replace_children(directories);
        self.image_items.replace_children(images);
        tracing::debug!(
            target: targets::VIEWER,
            directories = counts.0,
            images = counts.1,
            "rendered listing"
        );
        counts
    }
}

static_assertions::assert_impl_all!(ImageViewer: Send, Sync);

/// Rewrites every run of backslashes to a single forward slash.
pub fn normalize_separators(filename: &str) -> String {
    let mut normalized = String::with_capacity(filename.len());
    let mut in_run = false;
    for c in filename.chars() {
        if c == '\\' {
            if !in_run {
                normalized.push('/');
            }
            in_run = true;
        } else {
            normalized.push(c);
            in_run = false;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators(r"..\photos\\cat.png"), "../photos/cat.png");
        assert_eq!(normalize_separators(r"C:\\\Users\me"), "C:/Users/me");
        assert_eq!(normalize_separators("a/b"), "a/b");
        assert_eq!(normalize_separators(""), "");
    }

    #[test]
    fn test_settlement_accessors() {
        let settlement = Settlement::DiscardedStale {
            generation: 1,
            latest: 2,
            path: "/a".into(),
        };
        assert_eq!(settlement.generation(), 1);
        assert_eq!(settlement.path(), "/a");
    }
}
