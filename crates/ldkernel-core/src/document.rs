//! Validated JSON-LD working documents.

use serde_json::{Map, Value};

use crate::errors::InputError;

/// Reserved key identifying the linked-data context.
pub const CONTEXT_KEY: &str = "@context";
/// Reserved key carrying the node type.
pub const TYPE_KEY: &str = "@type";
/// Key under which the pipeline attaches provenance.
pub const PROVENANCE_KEY: &str = "provenance";

/// A JSON object known to carry `@context`.
///
/// A `Document` always owns its data: [`Document::from_input`] deep-copies
/// the caller's value, so rules mutate a private working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Validates `input` and takes a deep copy of it.
    pub fn from_input(input: &Value) -> Result<Self, InputError> {
        let Some(map) = input.as_object() else {
            return Err(InputError::NotAnObject);
        };
        if !map.contains_key(CONTEXT_KEY) {
            return Err(InputError::MissingContext);
        }
        Ok(Self(map.clone()))
    }

    /// The `@context` value, unless a rule removed it.
    pub fn context(&self) -> Option<&Value> {
        self.0.get(CONTEXT_KEY)
    }

    /// Looks up a top-level member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Mutable access to a top-level member.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// String value of a top-level member.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Mutable access to a top-level member that is itself an object.
    pub fn object_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(key).and_then(Value::as_object_mut)
    }

    /// Whether a top-level member is present (a `null` value counts).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets a top-level member, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Borrows the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Releases the underlying object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}
