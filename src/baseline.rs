//! Reset baseline for the scene root and per-field layout defaults
//!
//! After a reset the scene must never fall through to CSS-inherited initial
//! values; those render visibly broken. Instead a documented numeric
//! baseline is reapplied, and every text field carries its own default
//! position, font and alignment. The defaults ship as an embedded TOML
//! document so alternative baselines can be loaded from disk.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{FieldKey, FieldLayout, PropName, StyleMap};

/// Errors that can occur when loading or parsing a baseline
#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("Failed to read baseline file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse baseline TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// TOML structure for deserializing baselines
#[derive(Deserialize)]
struct TomlBaseline {
    protect: ProtectSection,
    reset: StyleMap,
    capture: CaptureSection,
    fields: BTreeMap<FieldKey, FieldLayout>,
}

#[derive(Deserialize)]
struct ProtectSection {
    vars: Vec<PropName>,
}

#[derive(Deserialize)]
struct CaptureSection {
    critical: Vec<PropName>,
}

/// Default baseline: dimension constants are protected, the holographic
/// layer numerics reset to visible-but-neutral values, and the seven text
/// fields get the card's stock typography.
const DEFAULT_BASELINE: &str = r##"
[protect]
vars = ["--card-width", "--card-height", "--card-radius"]

[reset]
"--holo-opacity" = "0.6"
"--holo2-opacity" = "0"
"--holo-scale" = "100%"
"--holo2-scale" = "200%"
"--holo-pos-x" = "50"
"--holo-pos-y" = "50"
"--holo2-pos-x" = "50"
"--holo2-pos-y" = "50"
"--holo-repeats" = "1"
"--back-mask-opacity" = "0"

[capture]
critical = [
    "--template-frame", "--template-back", "--template-mask",
    "--holo-mask-texture", "--holo-gradient", "--holo-blend-mode",
    "--holo-opacity", "--holo-size",
    "--accent-color", "--template-font",
    "--back-blur", "--back-brightness", "--back-grayscale",
    "--back-filter-url", "--grade-mix-blend",
    "--template-blend-mode", "--template-color", "--template-sparkle",
    "--grade-texture", "--back-effect",
    "--back-mask", "--back-mask-blend", "--back-mask-opacity", "--back-mask-color",
    "--holo-pos-x", "--holo-pos-y", "--holo-scale",
]

[fields.name]
bottom = "24px"
left = "28px"
fontSize = "26px"
fontFamily = "'Teko', sans-serif"
textAlign = "left"

[fields.grade]
bottom = "12px"
right = "27px"
fontSize = "26px"
fontFamily = "'Teko', sans-serif"
textAlign = "right"

[fields.edition]
bottom = "2px"
fontSize = "9px"
fontFamily = "'Teko', sans-serif"

[fields.label]
fontSize = "12px"
fontFamily = "'Teko', sans-serif"

[fields.backTitle]
top = "20%"
fontSize = "24px"
fontFamily = "Arial, sans-serif"
textAlign = "center"
color = "#ffffff"

[fields.backBody]
top = "40%"
fontSize = "14px"
fontFamily = "Arial, sans-serif"
textAlign = "center"
color = "#dddddd"

[fields.backInfo]
bottom = "15%"
fontSize = "12px"
fontFamily = "Arial, sans-serif"
textAlign = "center"
color = "#aaaaaa"
"##;

/// The reset/default tables the resolution pipeline works from
#[derive(Debug, Clone)]
pub struct Baseline {
    /// Custom properties a reset must never remove (dimension constants)
    pub protected: Vec<PropName>,
    /// Numeric defaults reapplied after every reset
    pub reset_vars: StyleMap,
    /// Variables a capture includes even when no inline value is set
    pub critical_vars: Vec<PropName>,
    /// Stock layout per text field
    pub field_defaults: BTreeMap<FieldKey, FieldLayout>,
}

impl Baseline {
    /// Load a baseline from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, BaselineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a baseline from a TOML string
    pub fn from_str(content: &str) -> Result<Self, BaselineError> {
        let parsed: TomlBaseline = toml::from_str(content)?;
        Ok(Baseline {
            protected: parsed.protect.vars,
            reset_vars: parsed.reset,
            critical_vars: parsed.capture.critical,
            field_defaults: parsed.fields,
        })
    }

    /// Whether a custom property survives resets
    pub fn is_protected(&self, name: &PropName) -> bool {
        self.protected.contains(name)
    }

    /// Stock layout for a field; empty when the baseline does not know it
    pub fn field_default(&self, key: FieldKey) -> FieldLayout {
        self.field_defaults.get(&key).cloned().unwrap_or_default()
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self::from_str(DEFAULT_BASELINE).expect("Embedded baseline should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextAlign;

    #[test]
    fn test_default_baseline_parses() {
        let baseline = Baseline::default();
        assert_eq!(baseline.protected.len(), 3);
        assert!(baseline.is_protected(&PropName::from("--card-width")));
        assert!(!baseline.is_protected(&PropName::from("--holo-opacity")));
    }

    #[test]
    fn test_reset_vars_keep_holo_visible() {
        let baseline = Baseline::default();
        assert_eq!(
            baseline.reset_vars.get(&PropName::from("--holo-opacity")),
            Some(&"0.6".to_string())
        );
        assert_eq!(
            baseline.reset_vars.get(&PropName::from("--holo2-opacity")),
            Some(&"0".to_string())
        );
    }

    #[test]
    fn test_field_defaults_cover_every_field() {
        let baseline = Baseline::default();
        for key in FieldKey::ALL {
            assert!(
                baseline.field_defaults.contains_key(&key),
                "missing default for {key}"
            );
        }
    }

    #[test]
    fn test_field_default_alignment_modes() {
        let baseline = Baseline::default();
        let name = baseline.field_default(FieldKey::Name);
        assert_eq!(name.left.as_deref(), Some("28px"));
        assert_eq!(name.text_align, Some(TextAlign::Left));

        let grade = baseline.field_default(FieldKey::Grade);
        assert_eq!(grade.right.as_deref(), Some("27px"));
        assert_eq!(grade.text_align, Some(TextAlign::Right));

        let back_title = baseline.field_default(FieldKey::BackTitle);
        assert_eq!(back_title.text_align, Some(TextAlign::Center));
        assert!(back_title.left.is_none());
    }

    #[test]
    fn test_unknown_field_default_is_empty() {
        let baseline = Baseline::from_str("[protect]\nvars = []\n[reset]\n[capture]\ncritical = []\n[fields]\n")
            .expect("Should parse");
        assert_eq!(baseline.field_default(FieldKey::Name), FieldLayout::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Baseline::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
