//! Field layout application
//!
//! Every application starts from the field's stock default and canonical
//! class, so no position, advanced text property or ghost class survives a
//! template or grade switch.

use crate::baseline::Baseline;
use crate::config::{FieldKey, LayoutMap, TextAlign};
use crate::scene::Scene;

/// Suffix bare integer values with `px`; anything else passes through
fn px(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        format!("{value}px")
    } else {
        value.to_string()
    }
}

/// Treat empty strings the same as missing values
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Apply a layout map onto the scene's text fields.
///
/// Per field: reset to the stock default, merge the caller's override on
/// top key by key (an override with no keys set changes nothing), then
/// position according to the alignment mode. Returns the fields whose
/// paired input value had to be truncated to a new max length.
pub fn apply_layout(scene: &mut Scene, baseline: &Baseline, layout: &LayoutMap) -> Vec<FieldKey> {
    let mut truncated = Vec::new();

    for key in FieldKey::ALL {
        let defaults = baseline.field_default(key);
        let merged = defaults.merged_with(layout.get(&key));

        if let Some(el) = scene.fields.get_mut(&key) {
            el.style.clear();
            el.class_name = key.base_class().to_string();
            if let Some(class) = non_empty(&merged.class_name) {
                el.class_name = class.to_string();
            }

            if let Some(family) = non_empty(&merged.font_family) {
                el.style.font_family = Some(family.to_string());
            }
            if let Some(size) = non_empty(&merged.font_size) {
                el.style.font_size = Some(px(size));
            }
            if let Some(color) = non_empty(&merged.color) {
                el.style.color = Some(color.to_string());
            }

            let align = merged.text_align.unwrap_or(TextAlign::Left);
            el.style.text_align = Some(align.as_css().to_string());
            el.style.width = Some("auto".to_string());

            match align {
                TextAlign::Center => {
                    // Anchor at the midline; a numeric nudge rides on the
                    // transform so the element keeps width: auto
                    el.style.left = Some("50%".to_string());
                    el.style.right = Some("auto".to_string());
                    el.style.margin_left = Some("0".to_string());
                    el.style.margin_right = Some("0".to_string());
                    el.style.transform =
                        Some(match (non_empty(&merged.left), non_empty(&merged.right)) {
                            // Positive left offset moves right
                            (Some(left), _) => format!("translateX(calc(-50% + {}))", px(left)),
                            // Positive right offset moves left
                            (None, Some(right)) => {
                                format!("translateX(calc(-50% - {}))", px(right))
                            }
                            (None, None) => "translateX(-50%)".to_string(),
                        });
                }
                TextAlign::Right => {
                    el.style.transform = Some("none".to_string());
                    el.style.left = Some("auto".to_string());
                    el.style.right = Some(
                        non_empty(&merged.right)
                            .map(px)
                            .unwrap_or_else(|| "28px".to_string()),
                    );
                }
                TextAlign::Left | TextAlign::Justify => {
                    el.style.transform = Some("none".to_string());
                    el.style.right = Some("auto".to_string());
                    el.style.left = Some(
                        non_empty(&merged.left)
                            .map(px)
                            .unwrap_or_else(|| "28px".to_string()),
                    );
                }
            }

            // Vertical axis is independent of the alignment mode
            if let Some(top) = non_empty(&merged.top) {
                el.style.top = Some(px(top));
                el.style.bottom = Some("auto".to_string());
            }
            if let Some(bottom) = non_empty(&merged.bottom) {
                el.style.bottom = Some(px(bottom));
                if non_empty(&merged.top).is_none() {
                    el.style.top = Some("auto".to_string());
                }
            }
        }

        if let Some(input) = scene.inputs.get_mut(&key) {
            let max = merged.max_length.unwrap_or(50);
            input.max_length = max;
            if input.value.chars().count() > max {
                input.value = input.value.chars().take(max).collect();
                truncated.push(key);
            }
            input.placeholder = merged.sample_text.clone();
        }
    }

    truncated
}
