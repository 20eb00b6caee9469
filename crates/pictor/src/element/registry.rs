//! Tag-name registry for custom elements.

use std::collections::HashMap;

use thiserror::Error;

use pictor_core::logging::targets;

use super::{
    CustomElement, DynElement, Element, GryphIcon, ImgFrame, InputTextShell, ItemContainer,
    SimpleIcon,
};

/// Errors from defining or creating elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// The tag name is already defined.
    #[error("element already defined: {0}")]
    AlreadyDefined(String),
    /// Custom element names must start with a lowercase ASCII letter and
    /// contain a hyphen.
    #[error("invalid custom element name: {0}")]
    InvalidName(String),
    /// No element is defined under the tag name.
    #[error("undefined element: {0}")]
    Undefined(String),
}

type Constructor = fn() -> Box<dyn DynElement>;

fn construct<E: Element>() -> Box<dyn DynElement> {
    Box::new(CustomElement::<E>::new())
}

/// Maps tag names to element types.
#[derive(Default)]
pub struct ElementRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in element defined.
    pub fn with_builtin_elements() -> Result<Self, ElementError> {
        let mut registry = Self::new();
        registry.define::<ImgFrame>()?;
        registry.define::<GryphIcon>()?;
        registry.define::<SimpleIcon>()?;
        registry.define::<InputTextShell>()?;
        registry.define::<ItemContainer>()?;
        Ok(registry)
    }

    /// Defines `E` under its tag name.
    pub fn define<E: Element>(&mut self) -> Result<(), ElementError> {
        let tag = E::TAG_NAME;
        if !is_valid_name(tag) {
            return Err(ElementError::InvalidName(tag.to_string()));
        }
        if self.constructors.contains_key(tag) {
            return Err(ElementError::AlreadyDefined(tag.to_string()));
        }
        self.constructors.insert(tag, construct::<E>);
        tracing::debug!(target: targets::ELEMENT, tag, "defined element");
        Ok(())
    }

    /// Returns true if `tag` is defined.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Creates a new element by tag name.
    pub fn create(&self, tag: &str) -> Result<Box<dyn DynElement>, ElementError> {
        self.constructors
            .get(tag)
            .map(|constructor| constructor())
            .ok_or_else(|| ElementError::Undefined(tag.to_string()))
    }

    /// Defined tag names, sorted.
    pub fn tag_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn is_valid_name(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_lowercase())
        && tag.contains('-')
        && !tag.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
}
