//! Templates, grades and per-field layout descriptions

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving a configuration tree
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A style variable name consumed by the rendering stylesheet.
///
/// Names are `--`-prefixed by convention but never validated: unknown keys
/// pass through opaquely and it is the stylesheet's business whether they
/// mean anything.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropName(String);

impl PropName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name uses the custom-property prefix.
    pub fn is_custom(&self) -> bool {
        self.0.starts_with("--")
    }
}

impl fmt::Display for PropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PropName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered mapping of style variable names to verbatim string values
pub type StyleMap = BTreeMap<PropName, String>;

/// Ordered mapping of asset keys (`frame`, `back`, `mask`, ...) to URLs.
///
/// Unknown keys are carried but not interpreted. An empty-string value is
/// meaningful in grade overlays: it clears the inherited asset rather than
/// falling back to the template's value.
pub type AssetMap = BTreeMap<String, String>;

/// Per-field layout descriptions keyed by text field
pub type LayoutMap = BTreeMap<FieldKey, FieldLayout>;

/// The text fields a layout can address
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Grade,
    Edition,
    Label,
    BackTitle,
    BackBody,
    BackInfo,
}

impl FieldKey {
    /// Every field, in application order
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Name,
        FieldKey::Grade,
        FieldKey::Edition,
        FieldKey::Label,
        FieldKey::BackTitle,
        FieldKey::BackBody,
        FieldKey::BackInfo,
    ];

    /// Canonical element class for this field; layout resets always restore it
    pub fn base_class(self) -> &'static str {
        match self {
            FieldKey::Name => "card__name",
            FieldKey::Grade => "card__grade",
            FieldKey::Edition => "card__edition",
            FieldKey::Label => "card__label",
            FieldKey::BackTitle => "card__back-title",
            FieldKey::BackBody => "card__back-body",
            FieldKey::BackInfo => "card__back-info",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Grade => "grade",
            FieldKey::Edition => "edition",
            FieldKey::Label => "label",
            FieldKey::BackTitle => "backTitle",
            FieldKey::BackBody => "backBody",
            FieldKey::BackInfo => "backInfo",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment; also selects the positioning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Layout description for one text field.
///
/// All keys are optional: a missing key falls through to the field default,
/// and an empty map is exactly equivalent to no override at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,
}

impl FieldLayout {
    /// Merge `over` onto `self` key by key. Keys present on the override win;
    /// missing keys keep the base value. Passing `None` (or an override with
    /// no keys set) returns `self` unchanged.
    pub fn merged_with(&self, over: Option<&FieldLayout>) -> FieldLayout {
        let Some(over) = over else {
            return self.clone();
        };
        FieldLayout {
            top: over.top.clone().or_else(|| self.top.clone()),
            left: over.left.clone().or_else(|| self.left.clone()),
            right: over.right.clone().or_else(|| self.right.clone()),
            bottom: over.bottom.clone().or_else(|| self.bottom.clone()),
            font_size: over.font_size.clone().or_else(|| self.font_size.clone()),
            font_family: over
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            color: over.color.clone().or_else(|| self.color.clone()),
            text_align: over.text_align.or(self.text_align),
            max_length: over.max_length.or(self.max_length),
            class_name: over.class_name.clone().or_else(|| self.class_name.clone()),
            sample_text: over
                .sample_text
                .clone()
                .or_else(|| self.sample_text.clone()),
        }
    }
}

/// Pan/zoom geometry of the user-supplied art image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// A named tier overlay within a template.
///
/// Only the keys a grade carries override the template; everything else
/// inherits. Grades are plain values, so cloning one never aliases the
/// template's layout objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub styles: StyleMap,
    pub assets: AssetMap,
    pub layout: LayoutMap,
}

impl Grade {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Badge text shown on the card: the symbol if set, else the first
    /// character of the label uppercased, else the first character of the id
    /// uppercased.
    pub fn badge_text(&self) -> String {
        if let Some(symbol) = &self.symbol {
            if !symbol.is_empty() {
                return symbol.clone();
            }
        }
        let initial = |s: &str| {
            s.chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default()
        };
        let from_label = initial(&self.label);
        if !from_label.is_empty() {
            from_label
        } else {
            initial(&self.id)
        }
    }

    /// Deep copy under a new id. The copied layout never shares objects with
    /// the source.
    pub fn duplicate(&self, new_id: impl Into<String>) -> Grade {
        let mut copy = self.clone();
        copy.id = new_id.into();
        copy
    }
}

/// A named base visual configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub styles: StyleMap,
    pub assets: AssetMap,
    pub layout: LayoutMap,
    /// Grades in declaration order; the first one is the default tier
    pub grades: Vec<Grade>,
    /// Instance-level art injected when a saved card is reloaded for editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_transform: Option<ImageTransform>,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn grade(&self, id: &str) -> Option<&Grade> {
        self.grades.iter().find(|g| g.id == id)
    }

    pub fn grade_mut(&mut self, id: &str) -> Option<&mut Grade> {
        self.grades.iter_mut().find(|g| g.id == id)
    }

    /// First declared grade id, if the template has grades at all
    pub fn default_grade_id(&self) -> Option<&str> {
        self.grades.first().map(|g| g.id.as_str())
    }

    /// Pick the grade to apply: the requested id when it exists, else the
    /// first declared grade.
    pub fn resolve_grade_id<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested
            .filter(|id| self.grade(id).is_some())
            .or_else(|| self.default_grade_id())
    }

    /// Deep copy under a new id and display name
    pub fn duplicate(&self, new_id: impl Into<String>, new_name: impl Into<String>) -> Template {
        let mut copy = self.clone();
        copy.id = new_id.into();
        copy.name = new_name.into();
        copy.user_image = None;
        copy.user_transform = None;
        copy
    }
}

/// The whole configuration tree. Persistence is all-or-nothing: the tree is
/// saved and loaded as a single document, never patched piecewise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub templates: Vec<Template>,
}

impl CardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration tree from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a configuration tree from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize the whole tree to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn template(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    pub fn template_mut(&mut self, index: usize) -> Option<&mut Template> {
        self.templates.get_mut(index)
    }

    /// Append a deep copy of the template at `index`; returns the new index
    pub fn duplicate_template(&mut self, index: usize) -> Option<usize> {
        let source = self.templates.get(index)?;
        let copy = source.duplicate(
            format!("{}-copy", source.id),
            format!("{} Copy", source.name),
        );
        self.templates.push(copy);
        Some(self.templates.len() - 1)
    }

    pub fn remove_template(&mut self, index: usize) -> Option<Template> {
        if index < self.templates.len() {
            Some(self.templates.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(left: &str, size: &str) -> FieldLayout {
        FieldLayout {
            left: Some(left.to_string()),
            font_size: Some(size.to_string()),
            ..FieldLayout::default()
        }
    }

    #[test]
    fn test_merged_with_override_wins_per_key() {
        let base = layout("28px", "26px");
        let over = FieldLayout {
            font_size: Some("30px".to_string()),
            ..FieldLayout::default()
        };
        let merged = base.merged_with(Some(&over));
        assert_eq!(merged.left.as_deref(), Some("28px"));
        assert_eq!(merged.font_size.as_deref(), Some("30px"));
    }

    #[test]
    fn test_merged_with_empty_override_is_identity() {
        let base = layout("28px", "26px");
        let merged = base.merged_with(Some(&FieldLayout::default()));
        assert_eq!(merged, base);
    }

    #[test]
    fn test_grade_duplicate_does_not_alias_layout() {
        let mut grade = Grade::new("gold", "Gold");
        grade.layout.insert(FieldKey::Name, layout("10px", "20px"));

        let mut copy = grade.duplicate("gold2");
        copy.layout.get_mut(&FieldKey::Name).unwrap().font_size = Some("99px".to_string());

        assert_eq!(
            grade.layout[&FieldKey::Name].font_size.as_deref(),
            Some("20px")
        );
    }

    #[test]
    fn test_resolve_grade_id_falls_back_to_first() {
        let mut tmpl = Template::new("t1", "Test");
        tmpl.grades.push(Grade::new("gold", "Gold"));
        tmpl.grades.push(Grade::new("silver", "Silver"));

        assert_eq!(tmpl.resolve_grade_id(Some("silver")), Some("silver"));
        assert_eq!(tmpl.resolve_grade_id(Some("bronze")), Some("gold"));
        assert_eq!(tmpl.resolve_grade_id(None), Some("gold"));
    }

    #[test]
    fn test_badge_text_precedence() {
        let mut grade = Grade::new("gold", "gold tier");
        assert_eq!(grade.badge_text(), "G");

        grade.symbol = Some("★".to_string());
        assert_eq!(grade.badge_text(), "★");

        let anonymous = Grade::new("silver", "");
        assert_eq!(anonymous.badge_text(), "S");
    }

    #[test]
    fn test_config_json_round_trip() {
        let mut config = CardConfig::new();
        let mut tmpl = Template::new("t1", "Holo Base");
        tmpl.styles
            .insert(PropName::from("--accent-color"), "#ff00aa".to_string());
        tmpl.assets
            .insert("frame".to_string(), "assets/frame.png".to_string());
        config.templates.push(tmpl);

        let json = config.to_json().expect("Should serialize");
        let parsed = CardConfig::from_json(&json).expect("Should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_duplicate_template_appends_copy() {
        let mut config = CardConfig::new();
        config.templates.push(Template::new("t1", "Base"));

        let idx = config.duplicate_template(0).expect("Should duplicate");
        assert_eq!(idx, 1);
        assert_eq!(config.templates[1].id, "t1-copy");
        assert_eq!(config.templates[1].name, "Base Copy");
    }
}
