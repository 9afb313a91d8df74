//! Page persistence gateway.
//!
//! # Responsibility
//! - Serialize the active page into its storage slot, stamped with the
//!   current modification time.
//! - Resolve concurrent updates from other views by last-writer-wins.
//!
//! # Invariants
//! - Writes always stamp the current time before storing.
//! - An incoming version is adopted only when its `mtime` is strictly
//!   greater than the in-memory one; ties and older versions lose.
//! - A corrupt stored document is unrecoverable for that load: the slot
//!   is discarded and a fresh blank page takes its place. The parse
//!   failure is logged, never propagated.

use super::slot::{SlotStore, StoredValue};
use super::StoreResult;
use crate::model::{DeserializeResult, ItemRegistry, Page, PageOptions, PageRecord, Paper};
use crate::render::dpi;
use log::{error, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Well-known slot holding the active page.
pub const PAGE_SLOT_KEY: &str = "quire.page";

/// A fresh blank document: US-letter ruled paper at display resolution.
pub fn fresh_page() -> Page {
    let dpi = dpi::display_dpi();
    Page::new(
        "",
        (8.5 * dpi).round() as u32,
        (11.0 * dpi).round() as u32,
        PageOptions {
            paper: Paper::Ruled,
            ..PageOptions::default()
        },
    )
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

/// Gateway between one view's in-memory page and the shared slot.
pub struct PageGateway<S: SlotStore> {
    store: S,
    key: String,
    registry: ItemRegistry,
    /// Modification time of the version this view currently holds.
    mtime: i64,
}

impl<S: SlotStore> PageGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PAGE_SLOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            registry: ItemRegistry::builtin(),
            mtime: 0,
        }
    }

    /// Replaces the item registry used while unserializing.
    pub fn set_registry(&mut self, registry: ItemRegistry) {
        self.registry = registry;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Modification time of the version held by this view.
    pub fn mtime(&self) -> i64 {
        self.mtime
    }

    /// Serializes and stores the page, stamped with the current time.
    ///
    /// Returns the stamped modification time.
    pub fn save(&mut self, page: &Page) -> StoreResult<i64> {
        let mtime = now_epoch_ms();
        let mut record = page.to_record();
        record.mtime = mtime;
        let raw = serde_json::to_string(&record)
            .map_err(crate::model::DeserializeError::from)?;
        self.store.write(&self.key, &StoredValue { raw, mtime })?;
        self.mtime = mtime;
        info!(
            "event=page_save module=storage status=ok key={} mtime={mtime}",
            self.key
        );
        Ok(mtime)
    }

    /// Loads the stored page, falling back to a fresh blank page when the
    /// slot is missing or corrupt. Corrupt slots are discarded.
    pub fn load(&mut self) -> StoreResult<Page> {
        let Some(stored) = self.store.read(&self.key)? else {
            info!(
                "event=page_load module=storage status=ok key={} source=fresh",
                self.key
            );
            self.mtime = 0;
            return Ok(fresh_page());
        };
        match self.parse(&stored.raw) {
            Ok((record, page)) => {
                self.mtime = record.mtime;
                info!(
                    "event=page_load module=storage status=ok key={} mtime={}",
                    self.key, record.mtime
                );
                Ok(page)
            }
            Err(err) => {
                error!(
                    "event=page_load module=storage status=error key={} error_code=corrupt_document error={err}",
                    self.key
                );
                self.store.clear(&self.key)?;
                self.mtime = 0;
                Ok(fresh_page())
            }
        }
    }

    /// Re-runs the last-writer-wins comparison against a raw stored value
    /// pushed by the host's storage-change signal.
    ///
    /// Returns the incoming page when it wins, so the caller can swap it
    /// in and redraw; `None` means the in-memory version stands and no
    /// redraw is needed. A corrupt incoming value never clobbers the
    /// in-memory page.
    pub fn on_storage_change(&mut self, raw: &str) -> Option<Page> {
        match self.parse(raw) {
            Ok((record, page)) => {
                if record.mtime > self.mtime {
                    info!(
                        "event=page_sync module=storage status=ok key={} action=adopt theirs={} ours={}",
                        self.key, record.mtime, self.mtime
                    );
                    self.mtime = record.mtime;
                    Some(page)
                } else {
                    info!(
                        "event=page_sync module=storage status=ok key={} action=keep theirs={} ours={}",
                        self.key, record.mtime, self.mtime
                    );
                    None
                }
            }
            Err(err) => {
                warn!(
                    "event=page_sync module=storage status=error key={} error_code=corrupt_notification error={err}",
                    self.key
                );
                None
            }
        }
    }

    fn parse(&self, raw: &str) -> DeserializeResult<(PageRecord, Page)> {
        let record: PageRecord = serde_json::from_str(raw)?;
        let page = Page::from_record(record.clone(), &self.registry)?;
        Ok((record, page))
    }
}
