//! Editor session context

use crate::config::{CardConfig, Template};

/// The saved card currently being re-edited, if any. Carrying the original
/// creation time here is what lets a re-save preserve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingRef {
    pub id: String,
    pub timestamp: u64,
}

/// Explicit session state threaded through editor and resolution calls.
///
/// One session object owns what used to live in ambient globals: the active
/// template index, the active grade, and the edit-reload reference.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub template_index: usize,
    pub grade_id: Option<String>,
    pub editing: Option<EditingRef>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch templates; the grade always restarts from the default tier
    pub fn select_template(&mut self, index: usize) {
        self.template_index = index;
        self.grade_id = None;
    }

    pub fn select_grade(&mut self, id: impl Into<String>) {
        self.grade_id = Some(id.into());
    }

    /// Record the grade the engine reported as actually applied
    pub fn sync_applied_grade(&mut self, applied: Option<String>) {
        self.grade_id = applied;
    }

    /// Enter re-edit mode for a saved card
    pub fn begin_editing(&mut self, id: impl Into<String>, timestamp: u64) {
        self.editing = Some(EditingRef {
            id: id.into(),
            timestamp,
        });
    }

    pub fn clear_editing(&mut self) {
        self.editing = None;
    }

    pub fn active_template<'a>(&self, config: &'a CardConfig) -> Option<&'a Template> {
        config.template(self.template_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_template_resets_grade() {
        let mut session = EditorSession::new();
        session.select_grade("gold");
        session.select_template(2);

        assert_eq!(session.template_index, 2);
        assert_eq!(session.grade_id, None);
    }

    #[test]
    fn test_editing_ref_round_trip() {
        let mut session = EditorSession::new();
        assert!(session.editing.is_none());

        session.begin_editing("card-1", 1700000000000);
        assert_eq!(session.editing.as_ref().unwrap().timestamp, 1700000000000);

        session.clear_editing();
        assert!(session.editing.is_none());
    }
}
