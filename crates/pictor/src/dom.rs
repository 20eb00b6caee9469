//! A minimal document tree for the display side.
//!
//! Containers hold [`Node`]s: text, plain elements such as `<p>`, and hosted
//! custom elements.

use crate::element::{DynElement, Element};

/// One node of the display tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A text node.
    Text(String),
    /// A plain element.
    Element(ElementNode),
    /// A hosted custom element.
    Custom(Box<dyn DynElement>),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Creates a `<p>` holding one text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Element(ElementNode::new("p").with_child(Node::text(text)))
    }

    /// Wraps a hosted custom element.
    pub fn custom(element: impl DynElement + 'static) -> Self {
        Node::Custom(Box::new(element))
    }

    /// Tag name, or `None` for text nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => Some(element.tag()),
            Node::Custom(element) => Some(element.tag_name()),
        }
    }

    /// Value of an attribute on an element node.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => element.attribute(name),
            Node::Custom(element) => element.attribute(name),
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
            Node::Custom(_) => String::new(),
        }
    }

    /// Downcasts a custom node to a concrete hosted element.
    pub fn as_custom<E: Element>(&self) -> Option<&crate::element::CustomElement<E>> {
        match self {
            Node::Custom(element) => element.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// A plain, non-custom element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl ElementNode {
    /// Creates an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Text(a), Node::Text(b)) => a == b,
            (Node::Element(a), Node::Element(b)) => a == b,
            (Node::Custom(a), Node::Custom(b)) => {
                a.tag_name() == b.tag_name() && a.attributes() == b.attributes()
            }
            _ => false,
        }
    }
}

impl Eq for Node {}
