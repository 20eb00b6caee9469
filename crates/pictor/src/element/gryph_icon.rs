//! The `gryph-icon` element: a single glyph drawn through a `::before`
//! pseudo-element.

use super::{Attributes, Element, StyleText};

const DEFAULT_FONT_SIZE: &str = "1em";

/// Glyph icon showing `gryph` at `font-size`.
pub struct GryphIcon;

impl Element for GryphIcon {
    const TAG_NAME: &'static str = "gryph-icon";
    type Presentation = StyleText;

    fn observed_attributes() -> &'static [&'static str] {
        &["gryph", "font-size"]
    }

    fn render(attributes: &Attributes) -> StyleText {
        let font_size = attributes.get_or("font-size", DEFAULT_FONT_SIZE);
        let content = match attributes.get("gryph") {
            Some(gryph) => format!("\"{}\"", gryph.replace('\\', "\\\\").replace('"', "\\\"")),
            None => "none".to_string(),
        };

        StyleText::new(format!(
            r#"
.gryph {{
    font-size: {font_size};
}}
.gryph::before {{
    content: {content};
}}"#
        ))
    }
}
