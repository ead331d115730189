//! Saved card snapshots

use serde::{Deserialize, Serialize};

use super::model::{ImageTransform, LayoutMap, StyleMap};

fn default_card_name() -> String {
    "Untitled Card".to_string()
}

fn default_template_id() -> String {
    "unknown".to_string()
}

/// A serialized snapshot of the scene at save time.
///
/// Upserted by id; immutable once captured except through an explicit
/// re-save. Structurally damaged records are repaired at read time through
/// field defaults rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedCard {
    pub id: String,
    #[serde(default = "default_card_name")]
    pub name: String,
    pub edition: String,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_id: Option<String>,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    pub template_index: usize,
    pub label: String,
    pub image_src: String,
    /// Full captured custom-property map
    pub styles: StyleMap,
    /// Captured per-field style and position
    pub layout: LayoutMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_transform: Option<ImageTransform>,
    /// Data-URI image of the rendered label, when one was captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_snapshot: Option<String>,
    /// Creation time (ms since epoch); preserved across re-saves
    pub timestamp: u64,
    /// Last modification time (ms since epoch)
    pub updated_at: u64,
}
