//! Interactive editing: the drawing view and its storage-backed session.

pub mod area;
pub mod session;

pub use area::{EditorArea, EditorEvent, MSG_EMPTY_NOTEBOOK, MSG_NO_NOTEBOOK};
pub use session::EditorSession;
