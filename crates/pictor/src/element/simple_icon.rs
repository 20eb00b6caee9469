//! The `simple-icon` element: an icon-font span selected by class name.

use super::{Attributes, Element};

/// Class list and colour of the icon span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconClass {
    /// Classes on the span. Replaced wholesale on every render.
    pub class_list: Vec<String>,
    /// Value of the `--color` custom property, unset when absent.
    pub color: Option<String>,
}

impl IconClass {
    /// Returns the value of a custom property on the span.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        match name {
            "--color" => self.color.as_deref(),
            _ => None,
        }
    }
}

/// Icon named by `icon`, tinted by `color`.
pub struct SimpleIcon;

impl Element for SimpleIcon {
    const TAG_NAME: &'static str = "simple-icon";
    type Presentation = IconClass;

    fn observed_attributes() -> &'static [&'static str] {
        &["icon", "color"]
    }

    fn render(attributes: &Attributes) -> IconClass {
        IconClass {
            class_list: attributes
                .get("icon")
                .map(|icon| icon.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            color: attributes.get("color").map(str::to_string),
        }
    }
}
