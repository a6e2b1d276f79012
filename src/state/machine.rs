use super::error::{StateError, StateResult};
use super::{EditorMode, ModeTransition, SessionEvent};

#[derive(Debug)]
pub struct EditorSession {
    mode: EditorMode,
    transition_history: Vec<ModeTransition>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn filter_applied(&self) -> bool {
        self.mode.filter_applied()
    }

    pub fn can_transition(&self, event: SessionEvent) -> bool {
        self.next_mode(event).is_some()
    }

    pub fn next_mode(&self, event: SessionEvent) -> Option<EditorMode> {
        match (self.mode, event) {
            (EditorMode::Editing, SessionEvent::ApplyFilter) => Some(EditorMode::FilterPreview),
            (EditorMode::FilterPreview, SessionEvent::RemoveFilter) => Some(EditorMode::Editing),
            _ => None,
        }
    }

    /// The event that flips the current mode.
    pub fn toggle_event(&self) -> SessionEvent {
        match self.mode {
            EditorMode::Editing => SessionEvent::ApplyFilter,
            EditorMode::FilterPreview => SessionEvent::RemoveFilter,
        }
    }

    pub fn transition(&mut self, event: SessionEvent) -> StateResult<EditorMode> {
        tracing::debug!(from = ?self.mode, event = ?event, "request editor transition");
        let next = self.next_mode(event).ok_or_else(|| {
            let from = self.mode;
            tracing::warn!(from = ?from, event = ?event, "invalid editor transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        self.transition_history
            .push(ModeTransition::new(self.mode, event, next));
        self.mode = next;

        Ok(self.mode)
    }

    pub fn history(&self) -> &[ModeTransition] {
        &self.transition_history
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EditorMode::{:?}", self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_editing_without_filter() {
        let session = EditorSession::new();
        assert_eq!(session.mode(), EditorMode::Editing);
        assert!(!session.filter_applied());
        assert_eq!(session.toggle_event(), SessionEvent::ApplyFilter);
    }

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut session = EditorSession::new();
        assert!(session.can_transition(SessionEvent::ApplyFilter));
        assert!(!session.can_transition(SessionEvent::RemoveFilter));

        let _ = session
            .transition(SessionEvent::ApplyFilter)
            .expect("editing -> filter preview should transition");

        assert!(session.filter_applied());
        assert!(session.can_transition(SessionEvent::RemoveFilter));
        assert!(!session.can_transition(SessionEvent::ApplyFilter));
        assert_eq!(session.toggle_event(), SessionEvent::RemoveFilter);
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut session = EditorSession::new();
        session
            .transition(SessionEvent::ApplyFilter)
            .expect("apply should work");
        session
            .transition(SessionEvent::RemoveFilter)
            .expect("remove should work");

        assert_eq!(session.mode(), EditorMode::Editing);
        assert_eq!(
            session.history(),
            [
                ModeTransition::new(
                    EditorMode::Editing,
                    SessionEvent::ApplyFilter,
                    EditorMode::FilterPreview
                ),
                ModeTransition::new(
                    EditorMode::FilterPreview,
                    SessionEvent::RemoveFilter,
                    EditorMode::Editing
                ),
            ]
        );
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut session = EditorSession::new();

        let err = session
            .transition(SessionEvent::RemoveFilter)
            .expect_err("editing -> remove filter should fail");
        assert_eq!(
            err,
            StateError::InvalidStateTransition {
                from: EditorMode::Editing,
                event: SessionEvent::RemoveFilter
            }
        );
        assert_eq!(session.mode(), EditorMode::Editing);
        assert!(session.history().is_empty());
    }
}
