//! In-memory scene model
//!
//! The scene is the element tree the resolution engine drives: the root's
//! custom-property map, the frame/art image slots, seven positioned text
//! fields with paired input controls, and the effect layers addressed only
//! through class toggles. Resolved visual state is fully derived and never
//! persisted; capture reads it back out as plain maps.

mod element;
mod vars;

pub use element::{FxElement, ImageElement, InlineTextStyle, InputControl, TextElement};
pub use vars::StyleVars;

use std::collections::BTreeMap;

use crate::config::{FieldKey, ImageTransform};

/// The full element tree of one card visual.
///
/// Every sub-element is optional; a missing one is skipped during
/// resolution while the rest of the scene still resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub vars: StyleVars,
    pub frame: Option<ImageElement>,
    pub art: Option<ImageElement>,
    pub art_overlay: Option<ImageElement>,
    pub fields: BTreeMap<FieldKey, TextElement>,
    pub inputs: BTreeMap<FieldKey, InputControl>,
    /// Shine layer; carries the emboss-mode class
    pub shine: Option<FxElement>,
    /// Card back face; carries the back-holo-disabled class
    pub back_face: Option<FxElement>,
    /// Blurred back image layer; carries halftone effect state
    pub back_blur: Option<FxElement>,
    pub image_transform: Option<ImageTransform>,
}

impl Scene {
    /// A complete scene with every element present, as built by the host
    /// page under normal conditions.
    pub fn full() -> Self {
        let mut fields = BTreeMap::new();
        let mut inputs = BTreeMap::new();
        for key in FieldKey::ALL {
            fields.insert(key, TextElement::with_class(key.base_class()));
            inputs.insert(key, InputControl::default());
        }
        Self {
            vars: StyleVars::new(),
            frame: Some(ImageElement::default()),
            art: Some(ImageElement::default()),
            art_overlay: Some(ImageElement::default()),
            fields,
            inputs,
            shine: Some(FxElement::default()),
            back_face: Some(FxElement::default()),
            back_blur: Some(FxElement::default()),
            image_transform: None,
        }
    }

    pub fn field(&self, key: FieldKey) -> Option<&TextElement> {
        self.fields.get(&key)
    }

    pub fn field_mut(&mut self, key: FieldKey) -> Option<&mut TextElement> {
        self.fields.get_mut(&key)
    }

    pub fn input(&self, key: FieldKey) -> Option<&InputControl> {
        self.inputs.get(&key)
    }

    pub fn input_mut(&mut self, key: FieldKey) -> Option<&mut InputControl> {
        self.inputs.get_mut(&key)
    }
}

/// The mount point the engine resolves into. The scene itself may be
/// absent, which is the one fatal precondition for resolution.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub scene: Option<Scene>,
}

impl Stage {
    /// A stage with a complete scene mounted
    pub fn mounted() -> Self {
        Self {
            scene: Some(Scene::full()),
        }
    }

    /// A stage with no scene, for exercising the fatal path
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scene_has_every_field() {
        let scene = Scene::full();
        for key in FieldKey::ALL {
            assert!(scene.field(key).is_some());
            assert!(scene.input(key).is_some());
        }
        assert!(scene.frame.is_some());
        assert!(scene.shine.is_some());
    }

    #[test]
    fn test_field_elements_start_with_base_class() {
        let scene = Scene::full();
        assert_eq!(
            scene.field(FieldKey::BackTitle).unwrap().class_name,
            "card__back-title"
        );
    }
}
