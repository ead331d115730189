//! Holocard - card visual configuration and resolution
//!
//! This library manages trading-card visual configurations (frame,
//! holographic layers, text layout, grade tiers), resolves them onto an
//! in-memory scene model driven by custom properties, persists card
//! snapshots through pluggable stores, and exports standalone HTML.
//!
//! # Example
//!
//! ```rust
//! use holocard::config::{CardConfig, Template};
//! use holocard::resolve_card;
//!
//! let mut config = CardConfig::new();
//! config.templates.push(Template::new("base", "Base"));
//!
//! let (scene, applied_grade) = resolve_card(&config, 0, None).unwrap();
//! assert!(applied_grade.is_none());
//! assert!(!scene.vars.is_empty());
//! ```

pub mod baseline;
pub mod config;
pub mod editor;
pub mod export;
pub mod external;
pub mod gallery;
pub mod resolve;
pub mod scene;
pub mod store;

pub use baseline::{Baseline, BaselineError};
pub use config::{CardConfig, ConfigError, SavedCard, Template};
pub use resolve::{ResolutionEngine, ResolutionState, ResolveError};
pub use scene::{Scene, Stage};

use thiserror::Error;

/// Errors from the top-level resolve pipeline
#[derive(Debug, Error)]
pub enum CardError {
    /// The configuration tree has no template at this index
    #[error("template index {0} out of range")]
    TemplateNotFound(usize),

    /// Error during resolution
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Resolve one template from a configuration tree onto a fresh scene.
///
/// This is the main entry point for one-shot use: it mounts a complete
/// scene, applies the template and grade, and hands the resolved scene
/// back together with the grade id that was actually applied.
///
/// # Example
///
/// ```rust
/// use holocard::config::{CardConfig, Grade, Template};
/// use holocard::resolve_card;
///
/// let mut config = CardConfig::new();
/// let mut template = Template::new("base", "Base");
/// template.grades.push(Grade::new("gold", "Gold"));
/// config.templates.push(template);
///
/// let (_, applied) = resolve_card(&config, 0, None).unwrap();
/// assert_eq!(applied.as_deref(), Some("gold"));
/// ```
pub fn resolve_card(
    config: &CardConfig,
    template_index: usize,
    grade_id: Option<&str>,
) -> Result<(Scene, Option<String>), CardError> {
    let template = config
        .template(template_index)
        .ok_or(CardError::TemplateNotFound(template_index))?;

    let mut engine = ResolutionEngine::new();
    let mut stage = Stage::mounted();
    let applied = engine.apply(&mut stage, template, grade_id)?;

    match stage.scene {
        Some(scene) => Ok((scene, applied)),
        None => Err(CardError::Resolve(ResolveError::SceneMissing)),
    }
}
