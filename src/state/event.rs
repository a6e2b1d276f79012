use super::model::EditorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ApplyFilter,
    RemoveFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: EditorMode,
    pub event: SessionEvent,
    pub to: EditorMode,
}

impl ModeTransition {
    pub const fn new(from: EditorMode, event: SessionEvent, to: EditorMode) -> Self {
        Self { from, event, to }
    }
}
