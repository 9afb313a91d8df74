//! Polymorphic layer items and the kind registry.
//!
//! # Responsibility
//! - Define the `Item` contract every drawable document element implements.
//! - Map serialized type tags to deserializer functions.
//!
//! # Invariants
//! - Every serialized item carries a `type` tag taken from `Item::kind`.
//! - Deserializing an unregistered tag is a hard format error, never a
//!   silent skip: one corrupt item must not drop data or shift the
//!   positional indices of its siblings.

use crate::render::Surface;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A drawable, serializable document element owned by a layer.
pub trait Item {
    /// Stable type tag attached to the serialized form.
    fn kind(&self) -> &'static str;

    /// Draws the item onto a surface.
    fn draw(&self, surface: &mut dyn Surface);

    /// Plain-data form, without the type tag. Must be a JSON object.
    fn to_value(&self) -> Value;
}

impl std::fmt::Debug for dyn Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Deserializer registered for one item kind.
///
/// Receives the full tagged object; the `type` field may be ignored.
pub type DeserializeItemFn = fn(&Value) -> Result<Box<dyn Item>, DeserializeError>;

pub type DeserializeResult<T> = Result<T, DeserializeError>;

/// Format error raised while unserializing stored document data.
#[derive(Debug)]
pub enum DeserializeError {
    /// The item object has no string `type` field.
    MissingItemKind,
    /// The tag is not present in the registry.
    UnknownItemKind(String),
    /// Structurally invalid data behind a known tag or container.
    Malformed(String),
    /// The stored text is not valid JSON at all.
    Syntax(serde_json::Error),
}

impl Display for DeserializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingItemKind => write!(f, "serialized item has no `type` tag"),
            Self::UnknownItemKind(kind) => write!(f, "unknown item kind `{kind}`"),
            Self::Malformed(message) => write!(f, "malformed document data: {message}"),
            Self::Syntax(err) => write!(f, "invalid stored document text: {err}"),
        }
    }
}

impl Error for DeserializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DeserializeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Syntax(value)
    }
}

/// Registration error for [`ItemRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateKind(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKind(kind) => write!(f, "item kind already registered: {kind}"),
        }
    }
}

impl Error for RegistryError {}

/// Table of known item kinds.
///
/// Dispatch is a tag lookup, so kinds can never overlap or shadow each
/// other the way runtime type testing would allow.
pub struct ItemRegistry {
    entries: BTreeMap<&'static str, DeserializeItemFn>,
}

impl ItemRegistry {
    /// Empty registry, for hosts that define their own item set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry with the built-in kinds. Currently just `stroke`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .entries
            .insert(super::stroke::KIND, super::stroke::Stroke::from_value);
        registry
    }

    /// Registers one kind. Duplicate tags are rejected.
    pub fn register(
        &mut self,
        kind: &'static str,
        deserialize: DeserializeItemFn,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(kind) {
            return Err(RegistryError::DuplicateKind(kind.to_string()));
        }
        self.entries.insert(kind, deserialize);
        Ok(())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Sorted registered tags.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Deserializes one tagged item object.
    pub fn deserialize(&self, value: &Value) -> DeserializeResult<Box<dyn Item>> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(DeserializeError::MissingItemKind)?;
        let deserialize = self
            .entries
            .get(kind)
            .ok_or_else(|| DeserializeError::UnknownItemKind(kind.to_string()))?;
        deserialize(value)
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Serializes one item, attaching its type tag.
pub fn to_tagged_value(item: &dyn Item) -> Value {
    let mut value = item.to_value();
    match &mut value {
        Value::Object(fields) => {
            fields.insert("type".to_string(), Value::String(item.kind().to_string()));
        }
        other => {
            // Item contract: plain-data form is an object.
            debug_assert!(false, "item serialized to non-object value: {other:?}");
        }
    }
    value
}
