//! Page: one drawable canvas-sized unit with a paper background.
//!
//! # Responsibility
//! - Own an ordered list of layers plus size, title and paper options.
//! - Draw background then content; never the other way around.
//!
//! # Invariants
//! - `options.paper` defaults to ruled when unset; unknown paper names
//!   draw nothing and raise no error.
//! - `update_size` clamps the candidate to `options.min_size`
//!   component-wise before applying it.
//! - A resize notification is distinct from other change notifications so
//!   views can react to geometry alone.

use super::event::Listeners;
use super::item::{DeserializeResult, ItemRegistry};
use super::layer::{Layer, LayerRecord};
use crate::render::{paper, Surface};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Custom background draw routine carried by [`Paper::Custom`].
pub type PaperFn = Rc<dyn Fn(&Page, &mut dyn Surface)>;

/// Paper background selection.
#[derive(Clone)]
pub enum Paper {
    Blank,
    Ruled,
    Lined,
    Grid,
    /// Host-supplied draw routine. Serializes as `"custom"`, which reloads
    /// as an unknown name and draws nothing.
    Custom(PaperFn),
    /// Unrecognized stored name, preserved verbatim. Draws nothing.
    Unknown(String),
}

impl Paper {
    /// Built-in paper names, in serialized form.
    pub const NAMES: [&'static str; 4] = ["blank", "ruled", "lined", "grid"];

    pub fn parse(name: &str) -> Self {
        match name {
            "blank" => Self::Blank,
            "ruled" => Self::Ruled,
            "lined" => Self::Lined,
            "grid" => Self::Grid,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Blank => "blank",
            Self::Ruled => "ruled",
            Self::Lined => "lined",
            Self::Grid => "grid",
            Self::Custom(_) => "custom",
            Self::Unknown(name) => name,
        }
    }
}

impl Default for Paper {
    fn default() -> Self {
        Self::Ruled
    }
}

impl std::fmt::Debug for Paper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Paper({})", self.as_str())
    }
}

/// Option bag attached to a page.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub paper: Paper,
    /// When set, the page tracks the available surface area.
    pub autosize: bool,
    /// Component-wise lower bound applied by [`Page::update_size`].
    pub min_size: Option<(u32, u32)>,
}

/// Notification emitted by a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    LayerAdded { index: usize },
    LayerRemoved { index: usize },
    /// Geometry changed; carries the new size.
    Resize { size: (u32, u32) },
    TitleChanged { title: String },
}

/// Wire form of the option bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOptionsRecord {
    #[serde(default = "default_paper_name")]
    pub paper: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub autosize: Option<bool>,
    #[serde(rename = "minSize", skip_serializing_if = "Option::is_none", default)]
    pub min_size: Option<(u32, u32)>,
}

fn default_paper_name() -> String {
    "ruled".to_string()
}

/// Wire form of a page. `mtime` is stamped by the persistence gateway;
/// it stays zero for pages serialized inside a notebook tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub options: PageOptionsRecord,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layers: Option<Vec<LayerRecord>>,
    #[serde(default)]
    pub mtime: i64,
}

/// One drawable page.
pub struct Page {
    title: String,
    width: u32,
    height: u32,
    options: PageOptions,
    layers: Option<Vec<Layer>>,
    listeners: Listeners<PageEvent>,
}

impl Page {
    pub fn new(title: impl Into<String>, width: u32, height: u32, options: PageOptions) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            options,
            layers: None,
            listeners: Listeners::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.listeners.emit(&PageEvent::TitleChanged {
            title: self.title.clone(),
        });
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut PageOptions {
        &mut self.options
    }

    pub fn listeners(&self) -> &Listeners<PageEvent> {
        &self.listeners
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.listeners.emit(&PageEvent::Resize {
            size: (width, height),
        });
    }

    /// Applies a candidate size from autosizing, clamped to `min_size`.
    pub fn update_size(&mut self, candidate: (u32, u32)) {
        let size = match self.options.min_size {
            Some((min_w, min_h)) => (candidate.0.max(min_w), candidate.1.max(min_h)),
            None => candidate,
        };
        self.set_size(size.0, size.1);
    }

    pub fn layer_count(&self) -> usize {
        self.layers.as_ref().map_or(0, Vec::len)
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.as_ref().and_then(|layers| layers.get(index))
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers
            .as_mut()
            .and_then(|layers| layers.get_mut(index))
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().flat_map(|layers| layers.iter())
    }

    /// Appends a layer and returns its index.
    pub fn add_layer(&mut self, layer: Layer) -> usize {
        let layers = self.layers.get_or_insert_with(Vec::new);
        layers.push(layer);
        let index = layers.len() - 1;
        self.listeners.emit(&PageEvent::LayerAdded { index });
        index
    }

    /// Inserts a layer at `index`, clamped to the current count.
    pub fn add_layer_at(&mut self, layer: Layer, index: usize) -> usize {
        let layers = self.layers.get_or_insert_with(Vec::new);
        let index = index.min(layers.len());
        layers.insert(index, layer);
        self.listeners.emit(&PageEvent::LayerAdded { index });
        index
    }

    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        let layers = self.layers.as_mut()?;
        if index >= layers.len() {
            return None;
        }
        let layer = layers.remove(index);
        if layers.is_empty() {
            self.layers = None;
        }
        self.listeners.emit(&PageEvent::LayerRemoved { index });
        Some(layer)
    }

    /// Removes every layer, front to back, emitting one removal each.
    pub fn clear(&mut self) {
        while self.layer_count() > 0 {
            self.remove_layer(0);
        }
    }

    /// Draws paper background, then every layer in order.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.options.paper {
            Paper::Blank | Paper::Unknown(_) => {}
            Paper::Ruled => paper::draw_ruled(surface),
            Paper::Lined => paper::draw_lined(surface),
            Paper::Grid => paper::draw_grid(surface),
            Paper::Custom(draw) => draw(self, surface),
        }
        for layer in self.layers() {
            layer.draw(surface);
        }
    }

    pub fn to_record(&self) -> PageRecord {
        PageRecord {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            options: PageOptionsRecord {
                paper: self.options.paper.as_str().to_string(),
                autosize: self.options.autosize.then_some(true),
                min_size: self.options.min_size,
            },
            layers: self
                .layers
                .as_ref()
                .map(|layers| layers.iter().map(Layer::to_record).collect()),
            mtime: 0,
        }
    }

    pub fn from_record(record: PageRecord, registry: &ItemRegistry) -> DeserializeResult<Self> {
        let layers = match record.layers {
            Some(records) if !records.is_empty() => {
                let mut layers = Vec::with_capacity(records.len());
                for layer_record in records {
                    layers.push(Layer::from_record(layer_record, registry)?);
                }
                Some(layers)
            }
            _ => None,
        };
        Ok(Self {
            title: record.title,
            width: record.width,
            height: record.height,
            options: PageOptions {
                paper: Paper::parse(&record.options.paper),
                autosize: record.options.autosize.unwrap_or(false),
                min_size: record.options.min_size,
            },
            layers,
            listeners: Listeners::new(),
        })
    }
}
