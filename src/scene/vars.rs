//! Custom-property store for the scene root

use crate::baseline::Baseline;
use crate::config::{PropName, StyleMap};

/// The flat custom-property state of the scene root.
///
/// Application is fire-and-forget: values are stored verbatim with no
/// validation or coercion, and an invalid CSS value simply fails to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleVars {
    props: StyleMap,
}

impl StyleVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<PropName>, value: impl Into<String>) {
        self.props.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &PropName) -> Option<String> {
        self.props.remove(name)
    }

    pub fn get(&self, name: &PropName) -> Option<&str> {
        self.props.get(name).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropName, &String)> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Remove every custom property except the protect-list, then reapply
    /// the numeric baseline so nothing falls through to broken initial
    /// values.
    pub fn reset_all(&mut self, baseline: &Baseline) {
        self.props
            .retain(|name, _| !name.is_custom() || baseline.is_protected(name));
        for (name, value) in &baseline.reset_vars {
            self.props.insert(name.clone(), value.clone());
        }
    }

    /// Set each entry verbatim; property names arrive already prefixed
    pub fn apply_map(&mut self, map: &StyleMap) {
        for (name, value) in map {
            self.props.insert(name.clone(), value.clone());
        }
    }

    /// Read the custom-property state back into a persistable map.
    ///
    /// Inline values win; critical variables with no inline entry fall back
    /// to the baseline so class-driven templates still capture them.
    pub fn capture(&self, baseline: &Baseline) -> StyleMap {
        let mut out: StyleMap = self
            .props
            .iter()
            .filter(|(name, _)| name.is_custom())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        for name in &baseline.critical_vars {
            if out.contains_key(name) {
                continue;
            }
            if let Some(value) = baseline.reset_vars.get(name) {
                if !value.is_empty() && value != "none" && value != "initial" {
                    out.insert(name.clone(), value.clone());
                }
            }
        }

        out
    }
}
