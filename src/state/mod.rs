pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{ModeTransition, SessionEvent};
pub use machine::EditorSession;
pub use model::EditorMode;
