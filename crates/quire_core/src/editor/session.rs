//! Editor session: one view's editor area coupled to slot storage.
//!
//! # Responsibility
//! - Load the stored page into a fresh notebook on startup.
//! - Persist the page synchronously after every committed stroke, so the
//!   stored copy never lags a finished edit.
//! - Apply storage-change signals from other views of the same document.

use super::area::EditorArea;
use crate::model::Notebook;
use crate::render::Surface;
use crate::storage::{load_pen, save_pen, PageGateway, SlotStore, StoreResult};
use crate::tool::{Pen, PointerEvent};

/// Editor area bound to a storage slot.
pub struct EditorSession<S: SlotStore> {
    area: EditorArea,
    gateway: PageGateway<S>,
}

impl<S: SlotStore> EditorSession<S> {
    /// Loads the stored page and pen, wrapping the page in a single-page
    /// notebook.
    pub fn new(store: S) -> StoreResult<Self> {
        let mut gateway = PageGateway::new(store);
        let pen = load_pen(gateway.store())?;
        let page = gateway.load()?;
        let mut notebook = Notebook::new("");
        notebook.add_page(page);
        let mut area = EditorArea::new();
        area.set_pen(pen);
        area.set_notebook(Some(notebook));
        Ok(Self { area, gateway })
    }

    pub fn area(&self) -> &EditorArea {
        &self.area
    }

    pub fn area_mut(&mut self) -> &mut EditorArea {
        &mut self.area
    }

    /// Modification time of the stored version this session holds.
    pub fn mtime(&self) -> i64 {
        self.gateway.mtime()
    }

    /// Routes a pointer event; a committed stroke is persisted before this
    /// returns.
    pub fn pointer_event(
        &mut self,
        event: PointerEvent,
        surface: &mut dyn Surface,
    ) -> StoreResult<bool> {
        let committed = self.area.pointer_event(event, surface);
        if committed {
            if let Some(page) = self.area.current_page() {
                self.gateway.save(page)?;
            }
        }
        Ok(committed)
    }

    /// Reconfigures the pen and persists the new settings.
    pub fn set_pen(&mut self, pen: Pen) -> StoreResult<()> {
        save_pen(self.gateway.store(), &pen)?;
        self.area.set_pen(pen);
        Ok(())
    }

    /// Applies a storage-change signal carrying the raw stored value.
    ///
    /// Returns `true` when the incoming version won and the view was
    /// repainted; the in-memory page stands otherwise.
    pub fn on_storage_change(&mut self, raw: &str, surface: &mut dyn Surface) -> bool {
        let Some(page) = self.gateway.on_storage_change(raw) else {
            return false;
        };
        let index = self.area.current_page_index().unwrap_or(0);
        if let Some(notebook) = self.area.notebook_mut() {
            if notebook.replace_page(index, page).is_none() {
                return false;
            }
        } else {
            return false;
        }
        self.area.redraw(surface);
        true
    }
}
