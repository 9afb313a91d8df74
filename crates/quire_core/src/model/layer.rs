//! Layer: an ordered grouping of items within a page.
//!
//! # Responsibility
//! - Own items, keep their order, and notify observers of structure changes.
//! - Serialize items through the kind registry, tags included.
//!
//! # Invariants
//! - The backing collection is released when the last item is removed;
//!   "no items" and "empty collection" are both just a zero count.
//! - `clear` removes items one by one, so observers see the exact same
//!   event sequence as manual removal.

use super::event::Listeners;
use super::item::{to_tagged_value, DeserializeResult, Item, ItemRegistry};
use crate::render::Surface;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural-change notification emitted by a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    /// An item was appended or inserted at `index`.
    ItemAdded { index: usize },
    /// The item previously at `index` was removed.
    ItemRemoved { index: usize },
    NameChanged { name: String },
}

/// Wire form of a layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<Vec<Value>>,
}

/// Ordered collection of drawable items.
pub struct Layer {
    name: String,
    items: Option<Vec<Box<dyn Item>>>,
    listeners: Listeners<LayerEvent>,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("item_count", &self.item_count())
            .finish_non_exhaustive()
    }
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: None,
            listeners: Listeners::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.listeners.emit(&LayerEvent::NameChanged {
            name: self.name.clone(),
        });
    }

    pub fn listeners(&self) -> &Listeners<LayerEvent> {
        &self.listeners
    }

    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn item(&self, index: usize) -> Option<&dyn Item> {
        self.items
            .as_ref()
            .and_then(|items| items.get(index))
            .map(Box::as_ref)
    }

    pub fn items(&self) -> impl Iterator<Item = &dyn Item> + '_ {
        self.items
            .iter()
            .flat_map(|items| items.iter().map(Box::as_ref))
    }

    /// Appends an item and returns its index.
    pub fn add_item(&mut self, item: Box<dyn Item>) -> usize {
        let items = self.items.get_or_insert_with(Vec::new);
        items.push(item);
        let index = items.len() - 1;
        self.listeners.emit(&LayerEvent::ItemAdded { index });
        index
    }

    /// Inserts an item at `index`, clamped to the current count.
    pub fn add_item_at(&mut self, item: Box<dyn Item>, index: usize) -> usize {
        let items = self.items.get_or_insert_with(Vec::new);
        let index = index.min(items.len());
        items.insert(index, item);
        self.listeners.emit(&LayerEvent::ItemAdded { index });
        index
    }

    /// Removes the item at `index`, yielding it to the caller.
    pub fn remove_item(&mut self, index: usize) -> Option<Box<dyn Item>> {
        let items = self.items.as_mut()?;
        if index >= items.len() {
            return None;
        }
        let item = items.remove(index);
        if items.is_empty() {
            self.items = None;
        }
        self.listeners.emit(&LayerEvent::ItemRemoved { index });
        Some(item)
    }

    /// Removes every item, front to back, emitting one removal each.
    pub fn clear(&mut self) {
        while self.item_count() > 0 {
            self.remove_item(0);
        }
    }

    /// Draws the items in order.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for item in self.items() {
            item.draw(surface);
        }
    }

    pub fn to_record(&self) -> LayerRecord {
        LayerRecord {
            name: self.name.clone(),
            items: self
                .items
                .as_ref()
                .map(|items| items.iter().map(|item| to_tagged_value(item.as_ref())).collect()),
        }
    }

    pub fn from_record(record: LayerRecord, registry: &ItemRegistry) -> DeserializeResult<Self> {
        let items = match record.items {
            Some(values) if !values.is_empty() => {
                let mut items = Vec::with_capacity(values.len());
                for value in &values {
                    items.push(registry.deserialize(value)?);
                }
                Some(items)
            }
            _ => None,
        };
        Ok(Self {
            name: record.name,
            items,
            listeners: Listeners::new(),
        })
    }
}
