//! Notebook: the root document, an ordered sequence of pages.
//!
//! # Invariants
//! - The page collection is released when the last page is removed;
//!   "no pages" and "empty collection" are both just a zero count, and the
//!   serialized form omits the `pages` field entirely in that case.
//! - Page indices are stable only until a removal; the removal
//!   notification carries the removed index.

use super::event::Listeners;
use super::item::{DeserializeResult, ItemRegistry};
use super::page::{Page, PageRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Notification emitted by a notebook.
#[derive(Debug, Clone, PartialEq)]
pub enum NotebookEvent {
    /// A page was appended or inserted at `index`.
    PageAdded { index: usize },
    /// The page previously at `index` was removed.
    PageRemoved { index: usize },
    TitleChanged { title: String },
}

/// Wire form of a notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub options: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pages: Option<Vec<PageRecord>>,
}

/// Root document container.
pub struct Notebook {
    title: String,
    options: Map<String, Value>,
    pages: Option<Vec<Page>>,
    listeners: Listeners<NotebookEvent>,
}

impl Notebook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Map::new(),
            pages: None,
            listeners: Listeners::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.listeners.emit(&NotebookEvent::TitleChanged {
            title: self.title.clone(),
        });
    }

    /// Free-form option bag, carried through serialization untouched.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.options
    }

    pub fn listeners(&self) -> &Listeners<NotebookEvent> {
        &self.listeners
    }

    pub fn page_count(&self) -> usize {
        self.pages.as_ref().map_or(0, Vec::len)
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.as_ref().and_then(|pages| pages.get(index))
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.as_mut().and_then(|pages| pages.get_mut(index))
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.pages.iter().flat_map(|pages| pages.iter())
    }

    /// Appends a page and returns its index.
    pub fn add_page(&mut self, page: Page) -> usize {
        let pages = self.pages.get_or_insert_with(Vec::new);
        pages.push(page);
        let index = pages.len() - 1;
        self.listeners.emit(&NotebookEvent::PageAdded { index });
        index
    }

    /// Inserts a page at `index`, clamped to the current count.
    pub fn add_page_at(&mut self, page: Page, index: usize) -> usize {
        let pages = self.pages.get_or_insert_with(Vec::new);
        let index = index.min(pages.len());
        pages.insert(index, page);
        self.listeners.emit(&NotebookEvent::PageAdded { index });
        index
    }

    /// Removes the page at `index`, yielding it to the caller.
    pub fn remove_page(&mut self, index: usize) -> Option<Page> {
        let pages = self.pages.as_mut()?;
        if index >= pages.len() {
            return None;
        }
        let page = pages.remove(index);
        if pages.is_empty() {
            self.pages = None;
        }
        self.listeners.emit(&NotebookEvent::PageRemoved { index });
        Some(page)
    }

    /// Swaps in a replacement page without any notification. Used when a
    /// newer stored version of the same page is adopted during
    /// synchronization, which is not a user edit.
    pub fn replace_page(&mut self, index: usize, page: Page) -> Option<Page> {
        let slot = self.pages.as_mut()?.get_mut(index)?;
        Some(std::mem::replace(slot, page))
    }

    /// Removes every page, front to back, emitting one removal each.
    pub fn clear(&mut self) {
        while self.page_count() > 0 {
            self.remove_page(0);
        }
    }

    pub fn to_record(&self) -> NotebookRecord {
        NotebookRecord {
            title: self.title.clone(),
            options: self.options.clone(),
            pages: self
                .pages
                .as_ref()
                .map(|pages| pages.iter().map(Page::to_record).collect()),
        }
    }

    pub fn from_record(record: NotebookRecord, registry: &ItemRegistry) -> DeserializeResult<Self> {
        let pages = match record.pages {
            Some(records) if !records.is_empty() => {
                let mut pages = Vec::with_capacity(records.len());
                for page_record in records {
                    pages.push(Page::from_record(page_record, registry)?);
                }
                Some(pages)
            }
            _ => None,
        };
        Ok(Self {
            title: record.title,
            options: record.options,
            pages,
            listeners: Listeners::new(),
        })
    }
}
