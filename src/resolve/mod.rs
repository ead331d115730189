//! Template resolution
//!
//! The layered override system at the heart of the crate: a template's
//! styles, assets and layout apply onto a freshly reset scene, then an
//! active grade's partial maps layer on top. Every application is a full
//! rebuild from the baseline, so switching templates or grades can never
//! leak state from the previous configuration.

mod engine;
mod layout;
mod overlay;

pub use engine::{ResolutionEngine, ResolutionState, ResolveError};
pub use layout::apply_layout;
pub use overlay::{
    asset_override, css_url, effective_layout, effective_styles, AssetOverride, MASK_PASS,
};
