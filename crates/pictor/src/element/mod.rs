//! Attribute-driven custom elements.
//!
//! Each element is a plain type implementing [`Element`]: it names its tag,
//! declares the attributes it observes, and renders a presentation from the
//! full attribute set with a pure function. [`CustomElement`] hosts an element
//! type, stores its attributes and keeps its [`ShadowRoot`] in sync.
//!
//! # Elements
//!
//! | tag              | observed attributes        | presentation                 |
//! |------------------|----------------------------|------------------------------|
//! | `img-frame`      | `url`, `width`, `height`   | style text                   |
//! | `gryph-icon`     | `gryph`, `font-size`       | style text                   |
//! | `simple-icon`    | `icon`, `color`            | class list and `--color`     |
//! | `input-text`     | `prefix-symbol`            | `data-prefix-symbol`         |
//! | `item-container` | `direction`                | `--direction`                |
//!
//! # Example
//!
//! ```
//! use pictor::element::{CustomElement, ImgFrame};
//!
//! let mut frame = CustomElement::<ImgFrame>::new();
//! frame.set_attribute("url", "photos/cat.png");
//! assert!(frame.presentation().as_str().contains(r#"url("photos/cat.png")"#));
//! ```

mod attributes;
mod gryph_icon;
mod host;
mod img_frame;
mod input_text;
mod item_container;
mod registry;
mod simple_icon;

use std::fmt;

pub use attributes::Attributes;
pub use gryph_icon::GryphIcon;
pub use host::{CustomElement, DynElement, ShadowRoot};
pub use img_frame::ImgFrame;
pub use input_text::{InputTextShell, PrefixSymbol};
pub use item_container::{ContainerDirection, ItemContainer};
pub use registry::{ElementError, ElementRegistry};
pub use simple_icon::{IconClass, SimpleIcon};

/// Stylesheets linked into every shadow root, ahead of the element's own.
pub const SHARED_STYLESHEETS: &[&str] = &["./assets/css/destyle.css"];

/// An attribute-observing renderable element.
///
/// Implementations carry no state of their own: everything an element shows
/// is derived from its attributes by [`render`](Element::render).
pub trait Element: Send + Sync + 'static {
    /// The tag name the element is registered under.
    const TAG_NAME: &'static str;

    /// What a render produces.
    type Presentation: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Attributes whose changes trigger a re-render.
    fn observed_attributes() -> &'static [&'static str];

    /// Stylesheets the element links in addition to [`SHARED_STYLESHEETS`].
    fn stylesheets() -> &'static [&'static str] {
        &[]
    }

    /// Renders the presentation from the full attribute set.
    fn render(attributes: &Attributes) -> Self::Presentation;
}

/// Inline style text produced by a render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleText(String);

impl StyleText {
    /// Wraps style text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the style text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
