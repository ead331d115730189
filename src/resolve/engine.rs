//! Template resolution state machine
//!
//! One `apply` call drives the whole pipeline: reset the scene root, apply
//! the base template (styles, assets, layout), layer the active grade
//! overlay on top, then recompute the derived visual flags. Resolution is
//! synchronous and runs to completion; re-applying is always safe because
//! every step starts from a reset.

use thiserror::Error;
use tracing::{debug, error};

use crate::baseline::Baseline;
use crate::config::{FieldKey, Grade, PropName, StyleMap, Template};
use crate::scene::{Scene, Stage};

use super::layout::apply_layout;
use super::overlay::{
    asset_override, css_url, effective_layout, effective_styles, AssetOverride, MASK_PASS,
};

/// Errors that abort a resolution pass
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The scene root is gone; nothing downstream can proceed
    #[error("scene root not mounted")]
    SceneMissing,
}

/// Resolution progress for the active scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Unresolved,
    BaseApplied,
    GradeApplied,
}

/// Drives a scene from a template plus an optional grade overlay
pub struct ResolutionEngine {
    baseline: Baseline,
    state: ResolutionState,
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionEngine {
    pub fn new() -> Self {
        Self::with_baseline(Baseline::default())
    }

    pub fn with_baseline(baseline: Baseline) -> Self {
        Self {
            baseline,
            state: ResolutionState::Unresolved,
        }
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Resolve a template (and grade) onto the stage's scene.
    ///
    /// `grade_id` falls back to the template's first declared grade when it
    /// names nothing. Returns the grade id that ended up applied, if any.
    ///
    /// A missing scene root is fatal and reported. Missing sub-elements
    /// (frame image, individual text fields) are skipped one by one and the
    /// rest of the scene still resolves.
    pub fn apply(
        &mut self,
        stage: &mut Stage,
        template: &Template,
        grade_id: Option<&str>,
    ) -> Result<Option<String>, ResolveError> {
        let scene = match stage.scene.as_mut() {
            Some(scene) => scene,
            None => {
                error!(template = %template.id, "scene root not mounted, refusing to resolve");
                self.state = ResolutionState::Unresolved;
                return Err(ResolveError::SceneMissing);
            }
        };

        self.state = ResolutionState::Unresolved;

        // Independence between switches: drop everything, then rebuild
        scene.vars.reset_all(&self.baseline);

        // Instance art survives an edit reload; otherwise the slots clear
        // so a previous card's image cannot bleed into this template
        match template.user_image.as_deref().filter(|s| !s.is_empty()) {
            Some(user_image) => {
                if let Some(art) = scene.art.as_mut() {
                    art.set(user_image);
                }
                if let Some(overlay) = scene.art_overlay.as_mut() {
                    overlay.src = user_image.to_string();
                }
                if template.user_transform.is_some() {
                    scene.image_transform = template.user_transform;
                }
            }
            None => {
                if let Some(art) = scene.art.as_mut() {
                    art.clear();
                }
                if let Some(overlay) = scene.art_overlay.as_mut() {
                    overlay.clear();
                }
                scene.image_transform = None;
            }
        }

        scene.vars.apply_map(&template.styles);
        apply_base_assets(scene, template);

        let cut = apply_layout(scene, &self.baseline, &template.layout);
        if !cut.is_empty() {
            debug!(fields = ?cut, "input values truncated by layout limits");
        }

        apply_derived_flags(scene, &template.styles);
        self.state = ResolutionState::BaseApplied;

        let applied = match template.resolve_grade_id(grade_id) {
            Some(id) => id.to_string(),
            None => return Ok(None),
        };
        if let Some(grade) = template.grade(&applied) {
            self.apply_grade(scene, template, grade);
            self.state = ResolutionState::GradeApplied;
            return Ok(Some(applied));
        }
        Ok(None)
    }

    /// Layer one grade over the already-applied base template
    fn apply_grade(&self, scene: &mut Scene, template: &Template, grade: &Grade) {
        // Layout first: a field the grade defines replaces the template's
        // version outright, everything else falls back to the base layout
        let cut = apply_layout(scene, &self.baseline, &effective_layout(template, grade));
        if !cut.is_empty() {
            debug!(fields = ?cut, grade = %grade.id, "input values truncated by grade layout");
        }

        scene.vars.apply_map(&grade.styles);

        apply_grade_assets(scene, grade);

        // Flags come from the merged map: a value set only at template
        // scope must survive a grade that does not restate it
        let merged = effective_styles(template, grade);
        apply_back_effect(scene, &merged);
        apply_derived_flags(scene, &merged);

        if let Some(el) = scene.fields.get_mut(&FieldKey::Grade) {
            el.content = grade.badge_text();
        }
    }
}

/// Base asset application: frame drives both a custom property and the
/// frame image element; back and mask are properties only. A template
/// without a mask gets the pass gradient because the compositing pipeline
/// intersects masks, and an absent one must not hide content.
fn apply_base_assets(scene: &mut Scene, template: &Template) {
    match template.assets.get("frame").filter(|s| !s.is_empty()) {
        Some(url) => {
            if let Some(frame) = scene.frame.as_mut() {
                frame.set(url.as_str());
            }
            scene.vars.set("--template-frame", css_url(url));
        }
        None => {
            if let Some(frame) = scene.frame.as_mut() {
                frame.clear();
            }
            scene.vars.set("--template-frame", "none");
        }
    }

    match template.assets.get("back").filter(|s| !s.is_empty()) {
        Some(url) => scene.vars.set("--template-back", css_url(url)),
        None => scene.vars.set("--template-back", "none"),
    }

    match template.assets.get("mask").filter(|s| !s.is_empty()) {
        Some(url) => scene.vars.set("--template-mask", css_url(url)),
        None => scene.vars.set("--template-mask", MASK_PASS),
    }
}

/// Grade asset overlay. Every key is tri-state: inherit silently, clear to
/// the neutral value, or override.
fn apply_grade_assets(scene: &mut Scene, grade: &Grade) {
    // Texture feeds the holographic luminance mask
    match asset_override(&grade.assets, "texture") {
        AssetOverride::Set(url) => scene.vars.set("--holo-mask-texture", css_url(url)),
        AssetOverride::Clear => scene.vars.set("--holo-mask-texture", MASK_PASS),
        AssetOverride::Inherit => {}
    }

    match asset_override(&grade.assets, "mask") {
        AssetOverride::Set(url) => scene.vars.set("--template-mask", css_url(url)),
        AssetOverride::Clear => scene.vars.set("--template-mask", MASK_PASS),
        AssetOverride::Inherit => {}
    }

    // The back image doubles as the grade texture sample
    match asset_override(&grade.assets, "back") {
        AssetOverride::Set(url) => {
            scene.vars.set("--template-back", css_url(url));
            scene.vars.set("--grade-texture", css_url(url));
        }
        AssetOverride::Clear => {
            scene.vars.set("--template-back", "none");
            scene.vars.set("--grade-texture", "none");
        }
        AssetOverride::Inherit => {}
    }

    match asset_override(&grade.assets, "frame") {
        AssetOverride::Set(url) => {
            scene.vars.set("--template-frame", css_url(url));
            if let Some(frame) = scene.frame.as_mut() {
                frame.set(url);
            }
        }
        AssetOverride::Clear => {
            scene.vars.set("--template-frame", "none");
            if let Some(frame) = scene.frame.as_mut() {
                frame.clear();
            }
        }
        AssetOverride::Inherit => {}
    }

    // Clearing the custom hologram map removes the property entirely so
    // the stylesheet's var() fallback chain takes over again
    match asset_override(&grade.assets, "holoMap") {
        AssetOverride::Set(url) => scene.vars.set("--holo-bg-image", css_url(url)),
        AssetOverride::Clear => {
            scene.vars.remove(&PropName::from("--holo-bg-image"));
        }
        AssetOverride::Inherit => {}
    }

    match asset_override(&grade.assets, "backMask") {
        AssetOverride::Set(url) => scene.vars.set("--back-mask", css_url(url)),
        AssetOverride::Clear => scene.vars.set("--back-mask", "none"),
        AssetOverride::Inherit => {}
    }
}

/// Special back-image treatments keyed off `--back-effect`
fn apply_back_effect(scene: &mut Scene, styles: &StyleMap) {
    let Some(back_blur) = scene.back_blur.as_mut() else {
        return;
    };
    back_blur.set_class("fx-halftone", false);
    scene.vars.set("--back-filter-url", "opacity(1)");

    match styles
        .get(&PropName::from("--back-effect"))
        .map(String::as_str)
    {
        Some("pen") => scene.vars.set("--back-filter-url", "url(#filter-pen)"),
        Some("halftone") => back_blur.set_class("fx-halftone", true),
        _ => {}
    }
}

/// Derived visual flags recomputed from a style map
fn apply_derived_flags(scene: &mut Scene, styles: &StyleMap) {
    if let Some(shine) = scene.shine.as_mut() {
        let emboss = styles
            .get(&PropName::from("--emboss-mode"))
            .map(String::as_str)
            == Some("true");
        shine.set_class("emboss-mode", emboss);
    }

    if let Some(back_face) = scene.back_face.as_mut() {
        let disabled = styles
            .get(&PropName::from("--back-holo-enabled"))
            .map(String::as_str)
            == Some("false");
        back_face.set_class("back-holo-disabled", disabled);
    }

    // Grade visibility spans the rendered text and its input control
    let display = styles
        .get(&PropName::from("--grade-display"))
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| "block".to_string());
    if let Some(el) = scene.fields.get_mut(&FieldKey::Grade) {
        el.style.display = Some(display.clone());
    }
    if let Some(input) = scene.inputs.get_mut(&FieldKey::Grade) {
        input.hidden = display == "none";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_template() -> Template {
        let mut tmpl = Template::new("t1", "Holo Base");
        tmpl.styles
            .insert(PropName::from("--accent-color"), "#336699".to_string());
        tmpl.assets
            .insert("frame".to_string(), "assets/frame.png".to_string());
        tmpl
    }

    #[test]
    fn test_missing_scene_is_fatal() {
        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::empty();
        let result = engine.apply(&mut stage, &base_template(), None);
        assert!(matches!(result, Err(ResolveError::SceneMissing)));
        assert_eq!(engine.state(), ResolutionState::Unresolved);
    }

    #[test]
    fn test_base_apply_sets_state_and_styles() {
        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        let applied = engine
            .apply(&mut stage, &base_template(), None)
            .expect("Should resolve");

        assert_eq!(applied, None);
        assert_eq!(engine.state(), ResolutionState::BaseApplied);

        let scene = stage.scene.as_ref().unwrap();
        assert_eq!(
            scene.vars.get(&PropName::from("--accent-color")),
            Some("#336699")
        );
        assert_eq!(
            scene.vars.get(&PropName::from("--template-frame")),
            Some("url('assets/frame.png')")
        );
        assert!(scene.frame.as_ref().unwrap().visible);
    }

    #[test]
    fn test_missing_mask_defaults_to_pass_gradient() {
        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        engine
            .apply(&mut stage, &base_template(), None)
            .expect("Should resolve");

        let scene = stage.scene.as_ref().unwrap();
        assert_eq!(
            scene.vars.get(&PropName::from("--template-mask")),
            Some(MASK_PASS)
        );
    }

    #[test]
    fn test_grade_defaults_to_first_declared() {
        let mut tmpl = base_template();
        tmpl.grades.push(Grade::new("gold", "Gold"));
        tmpl.grades.push(Grade::new("silver", "Silver"));

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        let applied = engine
            .apply(&mut stage, &tmpl, None)
            .expect("Should resolve");

        assert_eq!(applied.as_deref(), Some("gold"));
        assert_eq!(engine.state(), ResolutionState::GradeApplied);
    }

    #[test]
    fn test_unknown_grade_falls_back_to_default() {
        let mut tmpl = base_template();
        tmpl.grades.push(Grade::new("gold", "Gold"));

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        let applied = engine
            .apply(&mut stage, &tmpl, Some("mythic"))
            .expect("Should resolve");
        assert_eq!(applied.as_deref(), Some("gold"));
    }

    #[test]
    fn test_grade_display_from_template_survives_grade() {
        let mut tmpl = base_template();
        tmpl.styles
            .insert(PropName::from("--grade-display"), "none".to_string());
        // The grade restates nothing; the template-scoped value must win
        tmpl.grades.push(Grade::new("gold", "Gold"));

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        engine
            .apply(&mut stage, &tmpl, Some("gold"))
            .expect("Should resolve");

        let scene = stage.scene.as_ref().unwrap();
        assert_eq!(
            scene
                .field(FieldKey::Grade)
                .unwrap()
                .style
                .display
                .as_deref(),
            Some("none")
        );
        assert!(scene.input(FieldKey::Grade).unwrap().hidden);
    }

    #[test]
    fn test_emboss_flag_toggles_with_templates() {
        let mut embossed = base_template();
        embossed
            .styles
            .insert(PropName::from("--emboss-mode"), "true".to_string());

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        engine
            .apply(&mut stage, &embossed, None)
            .expect("Should resolve");
        assert!(stage
            .scene
            .as_ref()
            .unwrap()
            .shine
            .as_ref()
            .unwrap()
            .has_class("emboss-mode"));

        // A plain template clears the class again
        engine
            .apply(&mut stage, &base_template(), None)
            .expect("Should resolve");
        assert!(!stage
            .scene
            .as_ref()
            .unwrap()
            .shine
            .as_ref()
            .unwrap()
            .has_class("emboss-mode"));
    }

    #[test]
    fn test_grade_badge_text() {
        let mut tmpl = base_template();
        let mut gold = Grade::new("gold", "gold tier");
        gold.styles
            .insert(PropName::from("--accent-color"), "#ffd700".to_string());
        tmpl.grades.push(gold);

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        engine
            .apply(&mut stage, &tmpl, Some("gold"))
            .expect("Should resolve");

        let scene = stage.scene.as_ref().unwrap();
        assert_eq!(scene.field(FieldKey::Grade).unwrap().content, "G");
        assert_eq!(
            scene.vars.get(&PropName::from("--accent-color")),
            Some("#ffd700")
        );
    }

    #[test]
    fn test_user_image_restores_art_and_transform() {
        use crate::config::ImageTransform;

        let mut tmpl = base_template();
        tmpl.user_image = Some("data:image/png;base64,AAAA".to_string());
        tmpl.user_transform = Some(ImageTransform {
            x: 4.0,
            y: -2.0,
            scale: 1.25,
        });

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();
        engine
            .apply(&mut stage, &tmpl, None)
            .expect("Should resolve");

        let scene = stage.scene.as_ref().unwrap();
        assert!(scene.art.as_ref().unwrap().visible);
        assert_eq!(scene.image_transform.unwrap().scale, 1.25);

        // A template without instance art clears the slots again
        engine
            .apply(&mut stage, &base_template(), None)
            .expect("Should resolve");
        let scene = stage.scene.as_ref().unwrap();
        assert!(!scene.art.as_ref().unwrap().visible);
        assert!(scene.image_transform.is_none());
    }

    #[test]
    fn test_holo_map_clear_removes_property() {
        let mut tmpl = base_template();
        let mut gold = Grade::new("gold", "Gold");
        gold.assets
            .insert("holoMap".to_string(), "assets/map.png".to_string());
        let mut silver = Grade::new("silver", "Silver");
        silver.assets.insert("holoMap".to_string(), String::new());
        tmpl.grades.push(gold);
        tmpl.grades.push(silver);

        let mut engine = ResolutionEngine::new();
        let mut stage = Stage::mounted();

        engine
            .apply(&mut stage, &tmpl, Some("gold"))
            .expect("Should resolve");
        assert_eq!(
            stage
                .scene
                .as_ref()
                .unwrap()
                .vars
                .get(&PropName::from("--holo-bg-image")),
            Some("url('assets/map.png')")
        );

        engine
            .apply(&mut stage, &tmpl, Some("silver"))
            .expect("Should resolve");
        assert_eq!(
            stage
                .scene
                .as_ref()
                .unwrap()
                .vars
                .get(&PropName::from("--holo-bg-image")),
            None
        );
    }
}
