//! Grade overlay semantics

use crate::config::{AssetMap, FieldKey, Grade, LayoutMap, StyleMap, Template};

/// Neutral pass-through value for mask-like assets. White passes everything
/// in a luminance mask, so a cleared or missing mask never hides content.
pub const MASK_PASS: &str = "linear-gradient(#fff, #fff)";

/// Wrap an asset URL for use as a custom-property value
pub fn css_url(url: &str) -> String {
    format!("url('{url}')")
}

/// How one asset key resolves against an overlay map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOverride<'a> {
    /// Key absent: the template's value applies
    Inherit,
    /// Key present with an empty string: explicitly cleared; render the
    /// neutral value, never the template's
    Clear,
    /// Key present with a value
    Set(&'a str),
}

/// Look one asset key up in an overlay map.
///
/// Absent and empty are distinct states; collapsing them breaks
/// inheritance.
pub fn asset_override<'a>(assets: &'a AssetMap, key: &str) -> AssetOverride<'a> {
    match assets.get(key) {
        None => AssetOverride::Inherit,
        Some(value) if value.is_empty() => AssetOverride::Clear,
        Some(value) => AssetOverride::Set(value),
    }
}

/// Effective style map: template values first, grade keys override per key
pub fn effective_styles(template: &Template, grade: &Grade) -> StyleMap {
    let mut out = template.styles.clone();
    for (name, value) in &grade.styles {
        out.insert(name.clone(), value.clone());
    }
    out
}

/// Effective layout, field by field.
///
/// When the grade defines a field at all, its layout object replaces the
/// template's for that field; otherwise the template's object applies.
/// Replacement is per field, never per property.
pub fn effective_layout(template: &Template, grade: &Grade) -> LayoutMap {
    let mut out = LayoutMap::new();
    for key in FieldKey::ALL {
        if let Some(field) = grade.layout.get(&key) {
            out.insert(key, field.clone());
        } else if let Some(field) = template.layout.get(&key) {
            out.insert(key, field.clone());
        }
    }
    out
}
