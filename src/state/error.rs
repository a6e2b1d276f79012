use super::event::SessionEvent;
use super::model::EditorMode;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invalid editor transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: EditorMode,
        event: SessionEvent,
    },
}
