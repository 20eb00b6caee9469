//! Generic item container.
//!
//! [`Container`] wraps the `.container` content node of an `item-container`
//! element. Children are kept in append order; there is no other ordering.
//!
//! # Example
//!
//! ```
//! use pictor::component::Container;
//! use pictor::dom::Node;
//!
//! let container = Container::new();
//! container.append(Node::paragraph("/srv/photos"));
//! assert_eq!(container.len(), 1);
//!
//! container.clear();
//! assert!(container.is_empty());
//! ```
//!
//! # Signals
//!
//! - `children_changed(usize)`: Emitted with the new child count whenever
//!   children are appended or cleared

use parking_lot::Mutex;

use pictor_core::Signal;

use crate::dom::Node;
use crate::element::{CustomElement, ItemContainer};

/// A container of display nodes.
pub struct Container {
    /// The hosting `item-container` element.
    host: Mutex<CustomElement<ItemContainer>>,

    /// Children of the content node, in append order.
    children: Mutex<Vec<Node>>,

    /// Signal emitted when children are added or removed.
    pub children_changed: Signal<usize>,
}

impl Container {
    /// Create an empty container laid out in the default direction.
    pub fn new() -> Self {
        Self::with_host(CustomElement::new())
    }

    /// Create an empty container over an existing `item-container` element.
    pub fn with_host(host: CustomElement<ItemContainer>) -> Self {
        Self {
            host: Mutex::new(host),
            children: Mutex::new(Vec::new()),
            children_changed: Signal::new(),
        }
    }

    /// Set the `direction` attribute of the hosting element.
    pub fn set_direction(&self, direction: &str) {
        self.host.lock().set_attribute("direction", direction);
    }

    /// The effective flow direction.
    pub fn direction(&self) -> String {
        self.host.lock().presentation().direction.clone()
    }

    /// Remove every child.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.children.lock());
        if !removed.is_empty() {
            self.children_changed.emit(0);
        }
    }

    /// Append a child after the existing ones.
    pub fn append(&self, node: Node) {
        let len = {
            let mut children = self.children.lock();
            children.push(node);
            children.len()
        };
        self.children_changed.emit(len);
    }

    /// Replace every child in one step.
    pub fn replace_children(&self, nodes: Vec<Node>) {
        let len = nodes.len();
        let previous = std::mem::replace(&mut *self.children.lock(), nodes);
        if len != 0 || !previous.is_empty() {
            self.children_changed.emit(len);
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.lock().len()
    }

    /// Returns true if the container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.lock().is_empty()
    }

    /// A snapshot of the children.
    pub fn children(&self) -> Vec<Node> {
        self.children.lock().clone()
    }

    /// Run `f` over the children without cloning them.
    pub fn with_children<R>(&self, f: impl FnOnce(&[Node]) -> R) -> R {
        f(&self.children.lock())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(Container: Send, Sync);
