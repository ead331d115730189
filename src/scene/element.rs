//! Element types making up the scene

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An image slot (frame, art, art overlay)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageElement {
    pub src: String,
    pub visible: bool,
}

impl ImageElement {
    pub fn set(&mut self, src: impl Into<String>) {
        self.src = src.into();
        self.visible = true;
    }

    pub fn clear(&mut self) {
        self.src.clear();
        self.visible = false;
    }
}

/// Inline style state of a text element.
///
/// `None` means no inline value: the stylesheet decides. The advanced
/// text-rendering properties exist so a reset can prove they were cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InlineTextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_clip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix_blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
}

impl InlineTextStyle {
    /// Drop every inline value, advanced properties included
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A positioned text field on the card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextElement {
    pub class_name: String,
    pub content: String,
    pub style: InlineTextStyle,
}

impl TextElement {
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }
}

/// An effect layer addressed only through class toggles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FxElement {
    pub classes: BTreeSet<String>,
}

impl FxElement {
    pub fn set_class(&mut self, name: &str, on: bool) {
        if on {
            self.classes.insert(name.to_string());
        } else {
            self.classes.remove(name);
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }
}

/// A text input paired with a card field
#[derive(Debug, Clone, PartialEq)]
pub struct InputControl {
    pub value: String,
    pub max_length: usize,
    pub hidden: bool,
    /// Sample text shown while the value is empty
    pub placeholder: Option<String>,
}

impl Default for InputControl {
    fn default() -> Self {
        Self {
            value: String::new(),
            max_length: 50,
            hidden: false,
            placeholder: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_element_set_clear() {
        let mut img = ImageElement::default();
        img.set("assets/frame.png");
        assert!(img.visible);

        img.clear();
        assert!(img.src.is_empty());
        assert!(!img.visible);
    }

    #[test]
    fn test_fx_element_class_toggle() {
        let mut fx = FxElement::default();
        fx.set_class("emboss-mode", true);
        assert!(fx.has_class("emboss-mode"));
        fx.set_class("emboss-mode", false);
        assert!(!fx.has_class("emboss-mode"));
    }

    #[test]
    fn test_inline_style_clear_drops_advanced_props() {
        let mut style = InlineTextStyle {
            text_stroke: Some("1px #000".to_string()),
            background_image: Some("linear-gradient(red, blue)".to_string()),
            ..InlineTextStyle::default()
        };
        style.clear();
        assert_eq!(style, InlineTextStyle::default());
    }
}
