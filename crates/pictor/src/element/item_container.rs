//! The `item-container` element: a flex container laid out along `direction`.

use super::{Attributes, Element};

const DEFAULT_DIRECTION: &str = "row";

/// Inline style state of the `.container` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDirection {
    /// Value of the `--direction` custom property.
    pub direction: String,
}

impl ContainerDirection {
    /// Returns the value of a custom property on the content node.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        (name == "--direction").then_some(self.direction.as_str())
    }
}

/// Structural container whose children flow along `direction`.
pub struct ItemContainer;

impl Element for ItemContainer {
    const TAG_NAME: &'static str = "item-container";
    type Presentation = ContainerDirection;

    fn observed_attributes() -> &'static [&'static str] {
        &["direction"]
    }

    fn render(attributes: &Attributes) -> ContainerDirection {
        ContainerDirection {
            direction: attributes
                .get_or("direction", DEFAULT_DIRECTION)
                .to_string(),
        }
    }
}
