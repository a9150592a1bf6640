//! Buffered edits for the three discipline tabs.
//!
//! Each narrative section (intent, context, specification body) is edited
//! in its own tab against a local buffer. Switching tabs flushes the
//! outgoing tab's unsaved text before activating the new one, and the
//! autosave tick flushes only the currently active tab. Flushes are
//! expressed as a [`DocumentUpdate`] for the caller to commit through the
//! store.

use crate::models::{Document, DocumentUpdate};

/// One of the three narrative sections edited independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Intent,
    Context,
    Specification,
}

impl Discipline {
    fn index(self) -> usize {
        match self {
            Discipline::Intent => 0,
            Discipline::Context => 1,
            Discipline::Specification => 2,
        }
    }

    fn update_with(self, text: String) -> DocumentUpdate {
        match self {
            Discipline::Intent => DocumentUpdate {
                intent: Some(text),
                ..Default::default()
            },
            Discipline::Context => DocumentUpdate {
                context: Some(text),
                ..Default::default()
            },
            Discipline::Specification => DocumentUpdate {
                content: Some(text),
                ..Default::default()
            },
        }
    }
}

/// Per-tab edit buffers with dirty tracking
pub struct DisciplineBuffers {
    active: Discipline,
    texts: [String; 3],
    dirty: [bool; 3],
}

impl DisciplineBuffers {
    /// Seeds the buffers from a document's current narrative sections,
    /// activating the intent tab
    pub fn from_document(document: &Document) -> Self {
        Self {
            active: Discipline::Intent,
            texts: [
                document.intent.clone(),
                document.context.clone(),
                document.content.clone(),
            ],
            dirty: [false; 3],
        }
    }

    /// The currently active tab
    pub fn active(&self) -> Discipline {
        self.active
    }

    /// The buffered text of the given tab
    pub fn text(&self, discipline: Discipline) -> &str {
        &self.texts[discipline.index()]
    }

    /// Replaces the active tab's buffered text
    pub fn edit(&mut self, text: impl Into<String>) {
        let i = self.active.index();
        self.texts[i] = text.into();
        self.dirty[i] = true;
    }

    /// Activates another tab, flushing the outgoing tab's unsaved edits.
    ///
    /// Returns the update to commit, or `None` when the outgoing buffer
    /// was clean. This is what prevents silent loss of edits made in a
    /// just-left tab.
    pub fn switch_to(&mut self, next: Discipline) -> Option<DocumentUpdate> {
        let flushed = self.take_flush(self.active);
        self.active = next;
        flushed
    }

    /// Flushes the active tab's unsaved edits, as on an autosave tick.
    ///
    /// Only the active tab's buffer is flushed; other tabs keep their
    /// edits buffered until they are switched away from.
    pub fn flush_active(&mut self) -> Option<DocumentUpdate> {
        self.take_flush(self.active)
    }

    fn take_flush(&mut self, discipline: Discipline) -> Option<DocumentUpdate> {
        let i = discipline.index();
        if !self.dirty[i] {
            return None;
        }
        self.dirty[i] = false;
        Some(discipline.update_with(self.texts[i].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document() -> Document {
        Document {
            id: "doc-1".to_string(),
            name: "A".to_string(),
            intent: "old intent".to_string(),
            context: "old context".to_string(),
            content: "old body".to_string(),
            requirements: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            version: 1,
        }
    }

    #[test]
    fn test_switch_flushes_outgoing_tab() {
        let mut buffers = DisciplineBuffers::from_document(&document());
        buffers.edit("new intent");

        let update = buffers.switch_to(Discipline::Context).unwrap();
        assert_eq!(update.intent.as_deref(), Some("new intent"));
        assert!(update.context.is_none());
        assert_eq!(buffers.active(), Discipline::Context);
    }

    #[test]
    fn test_clean_switch_flushes_nothing() {
        let mut buffers = DisciplineBuffers::from_document(&document());
        assert!(buffers.switch_to(Discipline::Specification).is_none());
        assert_eq!(buffers.active(), Discipline::Specification);
    }

    #[test]
    fn test_autosave_tick_flushes_only_active_tab() {
        let mut buffers = DisciplineBuffers::from_document(&document());
        buffers.edit("new intent");

        let update = buffers.flush_active().unwrap();
        assert_eq!(update.intent.as_deref(), Some("new intent"));

        // A second tick with no further edits flushes nothing
        assert!(buffers.flush_active().is_none());
    }

    #[test]
    fn test_edits_survive_round_trip_between_tabs() {
        let mut buffers = DisciplineBuffers::from_document(&document());
        buffers.edit("new intent");
        buffers.switch_to(Discipline::Specification);
        buffers.edit("new body");

        let update = buffers.switch_to(Discipline::Intent).unwrap();
        assert_eq!(update.content.as_deref(), Some("new body"));
        assert_eq!(buffers.text(Discipline::Intent), "new intent");
    }
}
