/// Editing mode of one canvas session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Editing,
    /// The noir preview is stacked on top and content edits are locked.
    FilterPreview,
}

impl EditorMode {
    pub const fn filter_applied(self) -> bool {
        matches!(self, Self::FilterPreview)
    }

    pub const fn allows_content_edits(self) -> bool {
        matches!(self, Self::Editing)
    }
}
