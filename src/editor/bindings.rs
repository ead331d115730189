//! Control bindings into the configuration tree
//!
//! Every editor control targets either the active grade's maps or the
//! template's, never a mixture. The scope is derived once per editor render
//! and held until the next render; switching the active grade re-derives
//! every binding.

use thiserror::Error;

use crate::config::{CardConfig, FieldKey, FieldLayout, PropName, Template};
use crate::scene::Scene;

/// Errors from binding writes
#[derive(Error, Debug)]
pub enum EditError {
    #[error("template index {index} out of range")]
    TemplateOutOfRange { index: usize },
    #[error("grade not found: {id}")]
    GradeNotFound { id: String },
}

/// Which object a control reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingScope {
    Template,
    Grade(String),
}

impl BindingScope {
    /// Derive the scope for one editor render: a valid session grade wins,
    /// else the template's first declared grade, else template scope.
    pub fn derive(template: &Template, session_grade: Option<&str>) -> BindingScope {
        match template.resolve_grade_id(session_grade) {
            Some(id) => BindingScope::Grade(id.to_string()),
            None => BindingScope::Template,
        }
    }
}

fn template_mut<'a>(
    config: &'a mut CardConfig,
    index: usize,
) -> Result<&'a mut Template, EditError> {
    config
        .template_mut(index)
        .ok_or(EditError::TemplateOutOfRange { index })
}

/// Read a style value from the scoped object
pub fn read_style<'a>(
    config: &'a CardConfig,
    index: usize,
    scope: &BindingScope,
    name: &PropName,
) -> Option<&'a str> {
    let template = config.template(index)?;
    let styles = match scope {
        BindingScope::Template => &template.styles,
        BindingScope::Grade(id) => &template.grade(id)?.styles,
    };
    styles.get(name).map(String::as_str)
}

/// Write a style value into the scoped object
pub fn write_style(
    config: &mut CardConfig,
    index: usize,
    scope: &BindingScope,
    name: PropName,
    value: impl Into<String>,
) -> Result<(), EditError> {
    let template = template_mut(config, index)?;
    let styles = match scope {
        BindingScope::Template => &mut template.styles,
        BindingScope::Grade(id) => {
            &mut template
                .grade_mut(id)
                .ok_or_else(|| EditError::GradeNotFound { id: id.clone() })?
                .styles
        }
    };
    styles.insert(name, value.into());
    Ok(())
}

/// Write an asset URL into the scoped object.
///
/// An empty value is a deliberate clear in grade scope, so it is stored as
/// an empty string rather than removed. Note that an upload completing
/// after the session has moved on still writes into whatever scope the
/// caller passes here; whether such a late write should be discarded is a
/// product decision this layer does not make.
pub fn write_asset(
    config: &mut CardConfig,
    index: usize,
    scope: &BindingScope,
    key: impl Into<String>,
    url: impl Into<String>,
) -> Result<(), EditError> {
    let template = template_mut(config, index)?;
    let assets = match scope {
        BindingScope::Template => &mut template.assets,
        BindingScope::Grade(id) => {
            &mut template
                .grade_mut(id)
                .ok_or_else(|| EditError::GradeNotFound { id: id.clone() })?
                .assets
        }
    };
    assets.insert(key.into(), url.into());
    Ok(())
}

/// Edit one field's layout in the scoped object.
///
/// In grade scope the field is seeded from the template's layout on first
/// access, so the grade gets its own copy and the template's object is
/// never mutated through a grade control.
pub fn update_layout(
    config: &mut CardConfig,
    index: usize,
    scope: &BindingScope,
    field: FieldKey,
    edit: impl FnOnce(&mut FieldLayout),
) -> Result<(), EditError> {
    let template = template_mut(config, index)?;
    match scope {
        BindingScope::Template => {
            edit(template.layout.entry(field).or_default());
        }
        BindingScope::Grade(id) => {
            let seed = template.layout.get(&field).cloned().unwrap_or_default();
            let grade = template
                .grade_mut(id)
                .ok_or_else(|| EditError::GradeNotFound { id: id.clone() })?;
            edit(grade.layout.entry(field).or_insert(seed));
        }
    }
    Ok(())
}

/// Zero-latency path for the layer-2 position sliders: write the custom
/// property straight to the scene and let the next full resolution
/// reconcile the configuration tree.
pub fn live_write(scene: &mut Scene, name: impl Into<PropName>, value: impl Into<String>) {
    scene.vars.set(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Grade;

    fn config_with_grade() -> CardConfig {
        let mut config = CardConfig::new();
        let mut tmpl = Template::new("t1", "Test");
        tmpl.layout.insert(
            FieldKey::Name,
            FieldLayout {
                left: Some("28px".to_string()),
                font_size: Some("26px".to_string()),
                ..FieldLayout::default()
            },
        );
        tmpl.grades.push(Grade::new("gold", "Gold"));
        config.templates.push(tmpl);
        config
    }

    #[test]
    fn test_scope_derivation() {
        let config = config_with_grade();
        let tmpl = config.template(0).unwrap();

        assert_eq!(
            BindingScope::derive(tmpl, Some("gold")),
            BindingScope::Grade("gold".to_string())
        );
        // Unknown session grade falls back to the first declared one
        assert_eq!(
            BindingScope::derive(tmpl, Some("mythic")),
            BindingScope::Grade("gold".to_string())
        );

        let plain = Template::new("t2", "No Grades");
        assert_eq!(BindingScope::derive(&plain, None), BindingScope::Template);
    }

    #[test]
    fn test_style_write_targets_scope() {
        let mut config = config_with_grade();
        let name = PropName::from("--accent-color");

        write_style(
            &mut config,
            0,
            &BindingScope::Grade("gold".to_string()),
            name.clone(),
            "#ffd700",
        )
        .expect("Should write");

        let tmpl = config.template(0).unwrap();
        assert!(tmpl.styles.get(&name).is_none());
        assert_eq!(
            tmpl.grade("gold").unwrap().styles.get(&name),
            Some(&"#ffd700".to_string())
        );
    }

    #[test]
    fn test_grade_layout_edit_seeds_from_template() {
        let mut config = config_with_grade();
        let scope = BindingScope::Grade("gold".to_string());

        update_layout(&mut config, 0, &scope, FieldKey::Name, |layout| {
            layout.font_size = Some("32px".to_string());
        })
        .expect("Should edit");

        let tmpl = config.template(0).unwrap();
        let grade_layout = &tmpl.grade("gold").unwrap().layout[&FieldKey::Name];
        // Seeded value carried over, edit applied on the copy
        assert_eq!(grade_layout.left.as_deref(), Some("28px"));
        assert_eq!(grade_layout.font_size.as_deref(), Some("32px"));
        // The template's own layout is untouched
        assert_eq!(
            tmpl.layout[&FieldKey::Name].font_size.as_deref(),
            Some("26px")
        );
    }

    #[test]
    fn test_unknown_grade_is_an_error() {
        let mut config = config_with_grade();
        let result = write_style(
            &mut config,
            0,
            &BindingScope::Grade("mythic".to_string()),
            PropName::from("--x"),
            "1",
        );
        assert!(matches!(result, Err(EditError::GradeNotFound { .. })));
    }

    #[test]
    fn test_out_of_range_template_is_an_error() {
        let mut config = config_with_grade();
        let result = write_style(
            &mut config,
            7,
            &BindingScope::Template,
            PropName::from("--x"),
            "1",
        );
        assert!(matches!(
            result,
            Err(EditError::TemplateOutOfRange { index: 7 })
        ));
    }
}
