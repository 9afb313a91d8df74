//! Persistence: keyed storage slots and the page gateway.
//!
//! # Responsibility
//! - Keep SQL details behind the slot-store boundary.
//! - Resolve concurrent views of the same stored document by
//!   last-writer-wins on modification time.

use crate::db::DbError;
use crate::model::DeserializeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod gateway;
pub mod pen_store;
pub mod slot;

pub use gateway::{PageGateway, PAGE_SLOT_KEY};
pub use pen_store::{load_pen, save_pen, PEN_SLOT_KEY};
pub use slot::{SlotStore, SqliteSlotStore, StoredValue};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Format(DeserializeError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<DeserializeError> for StoreError {
    fn from(value: DeserializeError) -> Self {
        Self::Format(value)
    }
}
