//! Scene capture and saved-card assembly
//!
//! Capture reads the resolved scene back into plain maps a card snapshot
//! can carry. Assembly pairs that with the session context so a re-save of
//! an existing card upserts under the same id and keeps its creation time.

use crate::baseline::Baseline;
use crate::config::{
    CardConfig, FieldKey, FieldLayout, LayoutMap, SavedCard, StyleMap, TextAlign,
};
use crate::editor::EditorSession;
use crate::scene::Scene;

/// Capture the scene root's custom-property state
pub fn capture_styles(scene: &Scene, baseline: &Baseline) -> StyleMap {
    scene.vars.capture(baseline)
}

/// Extract the center-mode offset encoded in a transform value.
///
/// `translateX(calc(-50% + 20px))` came from a left offset of `20px`;
/// `translateX(calc(-50% - 15px))` from a right offset of `15px`;
/// a plain `translateX(-50%)` carries no offset.
fn center_offset(transform: &str) -> (Option<String>, Option<String>) {
    let Some(rest) = transform.strip_prefix("translateX(calc(-50% ") else {
        return (None, None);
    };
    let Some(rest) = rest.strip_suffix("))") else {
        return (None, None);
    };
    if let Some(value) = rest.strip_prefix("+ ") {
        return (Some(value.trim().to_string()), None);
    }
    if let Some(value) = rest.strip_prefix("- ") {
        return (None, Some(value.trim().to_string()));
    }
    (None, None)
}

fn non_auto(value: &Option<String>) -> Option<String> {
    value
        .clone()
        .filter(|s| !s.is_empty() && s != "auto")
}

/// Capture each text field's position and typography.
///
/// Positions are read back per alignment mode, so applying the captured
/// layout reproduces the same scene.
pub fn capture_layout(scene: &Scene) -> LayoutMap {
    let mut out = LayoutMap::new();

    for key in FieldKey::ALL {
        let Some(el) = scene.field(key) else { continue };
        let style = &el.style;

        let text_align = match style.text_align.as_deref() {
            Some("center") => Some(TextAlign::Center),
            Some("right") => Some(TextAlign::Right),
            Some("justify") => Some(TextAlign::Justify),
            Some("left") => Some(TextAlign::Left),
            _ => None,
        };

        let mut field = FieldLayout {
            text_align,
            ..FieldLayout::default()
        };

        match text_align {
            Some(TextAlign::Center) => {
                // The offset lives in the transform, not in left/right
                let (left, right) = center_offset(style.transform.as_deref().unwrap_or(""));
                field.left = left;
                field.right = right;
            }
            Some(TextAlign::Right) => {
                field.right = non_auto(&style.right);
            }
            _ => {
                field.left = non_auto(&style.left);
            }
        }

        field.top = non_auto(&style.top);
        field.bottom = non_auto(&style.bottom);
        field.font_size = style.font_size.clone();
        field.font_family = style.font_family.clone();
        field.color = style.color.clone();

        out.insert(key, field);
    }

    out
}

fn input_or(scene: &Scene, key: FieldKey, fallback: &str) -> String {
    scene
        .input(key)
        .map(|input| input.value.clone())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Assemble a card snapshot from the live scene.
///
/// In re-edit mode the card keeps its id and original creation time;
/// `updated_at` always moves to `now_ms`. The resulting card is what the
/// store upserts.
pub fn build_saved_card(
    scene: &Scene,
    baseline: &Baseline,
    config: &CardConfig,
    session: &EditorSession,
    label_snapshot: Option<String>,
    now_ms: u64,
) -> SavedCard {
    let template = config.template(session.template_index);
    let (id, timestamp) = match &session.editing {
        Some(editing) => (editing.id.clone(), editing.timestamp),
        None => (ulid::Ulid::new().to_string(), now_ms),
    };

    SavedCard {
        id,
        name: input_or(scene, FieldKey::Name, "NAME"),
        edition: input_or(scene, FieldKey::Edition, "EDITION"),
        grade: input_or(scene, FieldKey::Grade, "R"),
        label: input_or(scene, FieldKey::Label, "LABEL"),
        grade_id: session.grade_id.clone(),
        template_id: template
            .map(|t| t.id.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        template_index: session.template_index,
        image_src: scene
            .art
            .as_ref()
            .map(|art| art.src.clone())
            .unwrap_or_default(),
        styles: capture_styles(scene, baseline),
        layout: capture_layout(scene),
        img_transform: scene.image_transform,
        label_snapshot,
        timestamp,
        updated_at: now_ms,
    }
}

/// Reload a saved card for editing.
///
/// Finds the card's template by id, falling back to the stored index,
/// injects the instance art so the next resolution restores it, and points
/// the session at the card. Returns the template index, or `None` when the
/// card's template no longer exists.
pub fn load_card_for_edit(
    config: &mut CardConfig,
    session: &mut EditorSession,
    card: &SavedCard,
) -> Option<usize> {
    let index = config
        .templates
        .iter()
        .position(|t| t.id == card.template_id)
        .or_else(|| (card.template_index < config.templates.len()).then_some(card.template_index))?;

    let template = config.template_mut(index)?;
    if !card.image_src.is_empty() {
        template.user_image = Some(card.image_src.clone());
    }
    template.user_transform = card.img_transform;

    session.template_index = index;
    session.grade_id = card.grade_id.clone();
    session.begin_editing(card.id.clone(), card.timestamp);
    Some(index)
}
