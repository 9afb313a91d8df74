//! Core domain logic for Quire, a freehand sketching notebook.
//! This crate is the single source of truth for document invariants.

pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;
pub mod tool;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use editor::{EditorArea, EditorEvent, EditorSession};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    DeserializeError, Item, ItemRegistry, Layer, Notebook, Page, PageOptions, Paper, Stroke,
};
pub use render::{RecordingSurface, Surface};
pub use storage::{PageGateway, SlotStore, SqliteSlotStore, StoreError, StoreResult};
pub use tool::{Pen, PenTool, PointerButton, PointerEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
