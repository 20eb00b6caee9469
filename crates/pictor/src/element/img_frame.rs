//! The `img-frame` element: a fixed-size frame showing one image as a
//! cover-fitted background.

use super::{Attributes, Element, StyleText};

/// Default frame width and height.
const DEFAULT_SIZE: &str = "10rem";

/// Frame showing the image at `url`, sized by `width` and `height`.
pub struct ImgFrame;

impl Element for ImgFrame {
    const TAG_NAME: &'static str = "img-frame";
    type Presentation = StyleText;

    fn observed_attributes() -> &'static [&'static str] {
        &["url", "width", "height"]
    }

    fn render(attributes: &Attributes) -> StyleText {
        let width = attributes.get_or("width", DEFAULT_SIZE);
        let height = attributes.get_or("height", DEFAULT_SIZE);
        let background = match attributes.get("url") {
            Some(url) => format!(r#"url("{url}")"#),
            None => "none".to_string(),
        };

        StyleText::new(format!(
            r#"
.frame {{
    width: {width};
    height: {height};

    position: relative;
}}
.img {{
    position: absolute;
    top: 0;
    left: 0;

    width: inherit;
    height: inherit;
    background-image: {background};

    background-size: cover;
    background-position: center;
}}"#
        ))
    }
}
