// SPDX-License-Identifier: GPL-3.0-or-later

//! Loosely-typed JSON documents with typed, per-field extraction.
//!
//! A [`Document`] keeps whatever the service sent. Nothing is validated up
//! front: each field is checked only when it is read through [`get_field`],
//! which either converts the value or reports exactly which field failed and
//! why.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON object with its keys in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shorthand for [`get_field`] on this document.
    pub fn field<E: Extract>(&self, name: &str, extract: E) -> Result<E::Output, FieldError> {
        get_field(self, name, extract)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The JSON shape of a value, used in mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Bool => "bool",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Array => "array",
            Shape::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field {field:?} not found (document has: {})", .available.join(", "))]
    NotFound {
        field: String,
        available: Vec<String>,
    },

    #[error("field {field:?}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Field name, followed by the element index path for array members
        /// (e.g. `movieposter[2]`).
        field: String,
        expected: Shape,
        actual: Shape,
    },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            FieldError::NotFound { field, .. } | FieldError::TypeMismatch { field, .. } => field,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FieldError::NotFound { .. })
    }
}

/// A shape mismatch found while converting a value, before it is attributed
/// to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Array indices from the field value down to the offending element,
    /// outermost first.
    pub indices: Vec<usize>,
    pub expected: Shape,
    pub actual: Shape,
}

impl Mismatch {
    pub fn new(expected: Shape, actual: &Value) -> Self {
        Self {
            indices: Vec::new(),
            expected,
            actual: Shape::of(actual),
        }
    }

    fn at(mut self, index: usize) -> Self {
        self.indices.insert(0, index);
        self
    }

    fn into_field_error(self, name: &str) -> FieldError {
        let mut field = name.to_string();
        for index in &self.indices {
            field.push_str(&format!("[{index}]"));
        }
        FieldError::TypeMismatch {
            field,
            expected: self.expected,
            actual: self.actual,
        }
    }
}

/// Converts a JSON value of an expected shape into a typed value.
pub trait Extract {
    type Output;

    fn extract(&self, value: &Value) -> Result<Self::Output, Mismatch>;
}

/// Look up `name` in `document` and convert it with `extract`.
pub fn get_field<E: Extract>(
    document: &Document,
    name: &str,
    extract: E,
) -> Result<E::Output, FieldError> {
    let value = document.get(name).ok_or_else(|| FieldError::NotFound {
        field: name.to_string(),
        available: document.keys().map(str::to_string).collect(),
    })?;
    extract
        .extract(value)
        .map_err(|mismatch| mismatch.into_field_error(name))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsString;

pub fn as_string() -> AsString {
    AsString
}

impl Extract for AsString {
    type Output = String;

    fn extract(&self, value: &Value) -> Result<String, Mismatch> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Mismatch::new(Shape::String, value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsBool;

pub fn as_bool() -> AsBool {
    AsBool
}

impl Extract for AsBool {
    type Output = bool;

    fn extract(&self, value: &Value) -> Result<bool, Mismatch> {
        value
            .as_bool()
            .ok_or_else(|| Mismatch::new(Shape::Bool, value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsI64;

pub fn as_i64() -> AsI64 {
    AsI64
}

impl Extract for AsI64 {
    type Output = i64;

    // Floats and out-of-range integers are reported as a number mismatch.
    fn extract(&self, value: &Value) -> Result<i64, Mismatch> {
        value
            .as_i64()
            .ok_or_else(|| Mismatch::new(Shape::Number, value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsF64;

pub fn as_f64() -> AsF64 {
    AsF64
}

impl Extract for AsF64 {
    type Output = f64;

    fn extract(&self, value: &Value) -> Result<f64, Mismatch> {
        value
            .as_f64()
            .ok_or_else(|| Mismatch::new(Shape::Number, value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AsArray<E> {
    element: E,
}

/// Convert an array, applying `element` to every member.
pub fn as_array<E: Extract>(element: E) -> AsArray<E> {
    AsArray { element }
}

impl<E: Extract> Extract for AsArray<E> {
    type Output = Vec<E::Output>;

    fn extract(&self, value: &Value) -> Result<Self::Output, Mismatch> {
        let items = value
            .as_array()
            .ok_or_else(|| Mismatch::new(Shape::Array, value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.element.extract(item).map_err(|m| m.at(index)))
            .collect()
    }
}

/// Converts a JSON object into a view type built from a [`Document`].
pub struct AsObject<V> {
    view: PhantomData<fn() -> V>,
}

pub fn as_object<V: From<Document>>() -> AsObject<V> {
    AsObject { view: PhantomData }
}

pub fn as_document() -> AsObject<Document> {
    as_object()
}

impl<V> Clone for AsObject<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for AsObject<V> {}

impl<V> fmt::Debug for AsObject<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsObject")
            .field("view", &std::any::type_name::<V>())
            .finish()
    }
}

impl<V: From<Document>> Extract for AsObject<V> {
    type Output = V;

    fn extract(&self, value: &Value) -> Result<V, Mismatch> {
        match value {
            Value::Object(fields) => Ok(V::from(Document::new(fields.clone()))),
            other => Err(Mismatch::new(Shape::Object, other)),
        }
    }
}
