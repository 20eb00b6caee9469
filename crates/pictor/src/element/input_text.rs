//! The `input-text` shell element: the decorated frame around the path input.

use super::{Attributes, Element};

const DEFAULT_PREFIX_SYMBOL: &str = ">";

/// Dataset state of the shell's prefix node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSymbol {
    /// Value of `data-prefix-symbol`.
    pub prefix_symbol: String,
}

impl PrefixSymbol {
    /// Returns a `data-*` attribute of the prefix node.
    pub fn data(&self, name: &str) -> Option<&str> {
        (name == "prefix-symbol").then_some(self.prefix_symbol.as_str())
    }
}

/// Shell around a text input, showing `prefix-symbol` before the control.
pub struct InputTextShell;

impl Element for InputTextShell {
    const TAG_NAME: &'static str = "input-text";
    type Presentation = PrefixSymbol;

    fn observed_attributes() -> &'static [&'static str] {
        &["prefix-symbol"]
    }

    fn render(attributes: &Attributes) -> PrefixSymbol {
        PrefixSymbol {
            prefix_symbol: attributes
                .get_or("prefix-symbol", DEFAULT_PREFIX_SYMBOL)
                .to_string(),
        }
    }
}
