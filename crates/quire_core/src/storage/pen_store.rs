//! Pen settings persistence.
//!
//! The pen stores as plain `<color>:<size>` text, not JSON. Unreadable
//! stored text falls back to the default pen; editing settings are never
//! worth an error dialog.

use super::slot::{SlotStore, StoredValue};
use super::StoreResult;
use crate::tool::Pen;
use log::warn;
use std::time::{SystemTime, UNIX_EPOCH};

/// Well-known slot holding the pen settings.
pub const PEN_SLOT_KEY: &str = "quire.pen";

/// Stores the pen settings under [`PEN_SLOT_KEY`].
pub fn save_pen<S: SlotStore>(store: &S, pen: &Pen) -> StoreResult<()> {
    let mtime = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64);
    store.write(
        PEN_SLOT_KEY,
        &StoredValue {
            raw: pen.to_storage_string(),
            mtime,
        },
    )
}

/// Loads the stored pen settings, or the default pen when the slot is
/// missing or unreadable.
pub fn load_pen<S: SlotStore>(store: &S) -> StoreResult<Pen> {
    let Some(stored) = store.read(PEN_SLOT_KEY)? else {
        return Ok(Pen::default());
    };
    match Pen::parse(&stored.raw) {
        Ok(pen) => Ok(pen),
        Err(err) => {
            warn!(
                "event=pen_load module=storage status=error error_code=invalid_pen_text error={err}"
            );
            Ok(Pen::default())
        }
    }
}
