//! Document model: Notebook → Page → Layer → Item.
//!
//! # Responsibility
//! - Own the layered document tree and its mutation operations.
//! - Serialize to and from the stored wire form, items tagged by kind.
//!
//! # Invariants
//! - Containers exclusively own their children; there are no
//!   back-references from child to parent.
//! - Every structural mutation is observable through the container's
//!   listener list.

pub mod event;
pub mod item;
pub mod layer;
pub mod notebook;
pub mod page;
pub mod stroke;

pub use event::{ListenerId, Listeners};
pub use item::{DeserializeError, DeserializeResult, Item, ItemRegistry, RegistryError};
pub use layer::{Layer, LayerEvent, LayerRecord};
pub use notebook::{Notebook, NotebookEvent, NotebookRecord};
pub use page::{Page, PageEvent, PageOptions, PageOptionsRecord, PageRecord, Paper, PaperFn};
pub use stroke::Stroke;
