//! Hosting of [`Element`] types.

use std::any::Any;
use std::fmt;

use pictor_core::logging::targets;

use super::{Attributes, Element, SHARED_STYLESHEETS};

/// The isolated rendering root of a hosted element.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowRoot<P> {
    stylesheets: Vec<String>,
    presentation: P,
}

impl<P> ShadowRoot<P> {
    fn new(own_stylesheets: &[&str], presentation: P) -> Self {
        let stylesheets = SHARED_STYLESHEETS
            .iter()
            .chain(own_stylesheets)
            .map(|href| href.to_string())
            .collect();
        Self {
            stylesheets,
            presentation,
        }
    }

    /// Linked stylesheets, shared ones first.
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// The current presentation.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }
}

/// A live instance of an [`Element`] type.
///
/// The host owns the attribute set. Setting or removing an observed attribute
/// re-renders the shadow root from the full attribute set; unobserved
/// attributes are stored but never trigger a render. The element is rendered
/// once on creation, so the presentation always reflects the defaults of any
/// missing attribute.
pub struct CustomElement<E: Element> {
    attributes: Attributes,
    shadow_root: ShadowRoot<E::Presentation>,
    render_count: usize,
}

impl<E: Element> CustomElement<E> {
    /// Creates an element with no attributes.
    pub fn new() -> Self {
        Self::with_attributes(Attributes::new())
    }

    /// Creates an element with an initial attribute set.
    pub fn with_attributes(attributes: Attributes) -> Self {
        let presentation = E::render(&attributes);
        Self {
            shadow_root: ShadowRoot::new(E::stylesheets(), presentation),
            attributes,
            render_count: 1,
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns the tag name.
    pub fn tag_name(&self) -> &'static str {
        E::TAG_NAME
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Returns every attribute.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Sets an attribute, returning true if the element re-rendered.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        let old = self.attributes.set(name, value);
        self.attribute_changed(name, old.as_deref() != Some(value))
    }

    /// Removes an attribute, returning true if the element re-rendered.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let old = self.attributes.remove(name);
        self.attribute_changed(name, old.is_some())
    }

    /// Returns the shadow root.
    pub fn shadow_root(&self) -> &ShadowRoot<E::Presentation> {
        &self.shadow_root
    }

    /// Returns the current presentation.
    pub fn presentation(&self) -> &E::Presentation {
        &self.shadow_root.presentation
    }

    /// How many times the element has rendered, including the initial render.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    fn attribute_changed(&mut self, name: &str, changed: bool) -> bool {
        if !changed || !E::observed_attributes().iter().any(|observed| *observed == name) {
            return false;
        }
        self.shadow_root.presentation = E::render(&self.attributes);
        self.render_count += 1;
        tracing::trace!(
            target: targets::ELEMENT,
            tag = E::TAG_NAME,
            attribute = name,
            "re-rendered"
        );
        true
    }
}

impl<E: Element> Default for CustomElement<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> Clone for CustomElement<E> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            shadow_root: self.shadow_root.clone(),
            render_count: self.render_count,
        }
    }
}

impl<E: Element> fmt::Debug for CustomElement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElement")
            .field("tag", &E::TAG_NAME)
            .field("attributes", &self.attributes)
            .field("presentation", &self.shadow_root.presentation)
            .finish()
    }
}

/// Object-safe view of a hosted element, used where the element type is only
/// known by tag name.
pub trait DynElement: Send + Sync + fmt::Debug {
    /// Returns the tag name.
    fn tag_name(&self) -> &'static str;

    /// Returns the value of an attribute.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Returns every attribute.
    fn attributes(&self) -> &Attributes;

    /// Sets an attribute, returning true if the element re-rendered.
    fn set_attribute(&mut self, name: &str, value: &str) -> bool;

    /// Removes an attribute, returning true if the element re-rendered.
    fn remove_attribute(&mut self, name: &str) -> bool;

    /// Attributes whose changes trigger a re-render.
    fn observed_attributes(&self) -> &'static [&'static str];

    /// Linked stylesheets, shared ones first.
    fn stylesheets(&self) -> &[String];

    /// How many times the element has rendered.
    fn render_count(&self) -> usize;

    /// Clones into a new box.
    fn clone_box(&self) -> Box<dyn DynElement>;

    /// For downcasting to the concrete [`CustomElement`].
    fn as_any(&self) -> &dyn Any;
}

impl<E: Element> DynElement for CustomElement<E> {
    fn tag_name(&self) -> &'static str {
        E::TAG_NAME
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        CustomElement::attribute(self, name)
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        CustomElement::set_attribute(self, name, value)
    }

    fn remove_attribute(&mut self, name: &str) -> bool {
        CustomElement::remove_attribute(self, name)
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        E::observed_attributes()
    }

    fn stylesheets(&self) -> &[String] {
        self.shadow_root.stylesheets()
    }

    fn render_count(&self) -> usize {
        self.render_count
    }

    fn clone_box(&self) -> Box<dyn DynElement> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn DynElement> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl dyn DynElement {
    /// Downcasts to a concrete hosted element type.
    pub fn downcast_ref<E: Element>(&self) -> Option<&CustomElement<E>> {
        self.as_any().downcast_ref::<CustomElement<E>>()
    }
}
