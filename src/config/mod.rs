//! Configuration tree data model
//!
//! The tree is templates → grades → {styles, assets, layout}. A template is a
//! complete base visual; a grade is a partial overlay whose present keys win
//! and whose absent keys inherit. Everything here is plain cloneable data so
//! a grade can never share a layout object with its template by accident.

mod card;
mod model;

pub use card::SavedCard;
pub use model::{
    AssetMap, CardConfig, ConfigError, FieldKey, FieldLayout, Grade, ImageTransform, LayoutMap,
    PropName, StyleMap, Template, TextAlign,
};
