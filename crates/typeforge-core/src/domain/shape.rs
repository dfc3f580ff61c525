//! Shape analysis: the inferred structural type of a JSON value.
//!
//! A [`Shape`] is built bottom-up in one pass over a parsed
//! [`serde_json::Value`]. Array-ness belongs to the *position*, not to the
//! element kind, so `[1, 2]` and `1` share the kind `Number` and differ only
//! in [`Shape::is_array`].
//!
//! Arrays are typed from their first element only. Heterogeneous arrays are
//! not detected: `[1, "a"]` is a `number[]`.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

/// Primitive JSON kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
}

impl PrimitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a position holds, independent of array/optional flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    Primitive(PrimitiveKind),
    /// Fields in source order.
    Object(IndexMap<String, Shape>),
    /// `null`, or the element of an empty array.
    Unknown,
}

/// Inferred type of one JSON value at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub is_array: bool,
    pub is_optional: bool,
}

impl Shape {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            kind: ShapeKind::Primitive(kind),
            is_array: false,
            is_optional: false,
        }
    }

    pub fn object(fields: IndexMap<String, Shape>) -> Self {
        Self {
            kind: ShapeKind::Object(fields),
            is_array: false,
            is_optional: false,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: ShapeKind::Unknown,
            is_array: false,
            is_optional: false,
        }
    }

    pub fn into_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn into_optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, ShapeKind::Object(_))
    }

    /// Object fields, if this is an object shape.
    pub fn fields(&self) -> Option<&IndexMap<String, Shape>> {
        match &self.kind {
            ShapeKind::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short label used in error messages.
    pub fn describe(&self) -> &'static str {
        match (&self.kind, self.is_array) {
            (_, true) => "array",
            (ShapeKind::Object(_), false) => "object",
            (ShapeKind::Primitive(p), false) => p.as_str(),
            (ShapeKind::Unknown, false) => "null",
        }
    }

    /// Canonical structural signature.
    ///
    /// Object fields are sorted by name, so insertion order never affects the
    /// result. Names are written as escaped string literals, so a key holding
    /// `{`, `:` or `,` cannot imitate another shape. An object's own
    /// array/optional flags are not part of its signature: `{"a": 1}` and
    /// `[{"a": 1}]` name the same declaration.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }

    fn write_signature(&self, out: &mut String) {
        match &self.kind {
            ShapeKind::Object(fields) => {
                let mut names: Vec<&String> = fields.keys().collect();
                names.sort();

                out.push('{');
                for (i, name) in names.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    push_key(out, name);
                    fields[name.as_str()].write_signature(out);
                }
                out.push('}');
            }
            ShapeKind::Primitive(p) => {
                out.push_str(p.as_str());
                push_flags(out, self.is_array, self.is_optional);
            }
            ShapeKind::Unknown => {
                out.push_str("unknown");
                push_flags(out, self.is_array, self.is_optional);
            }
        }
    }
}

/// `"name":`, with the name escaped like a Rust string literal.
pub(crate) fn push_key(out: &mut String, name: &str) {
    out.push_str(&format!("{name:?}"));
    out.push(':');
}

pub(crate) fn push_flags(out: &mut String, is_array: bool, is_optional: bool) {
    if is_array {
        out.push_str("[]");
    }
    if is_optional {
        out.push('?');
    }
}

/// Infer the shape of `value`.
///
/// `field_hint` names the position being analysed; it only feeds trace
/// output. Every JSON value maps to some shape.
pub fn analyze(value: &Value, field_hint: &str) -> Shape {
    let shape = match value {
        Value::Null => Shape::unknown().into_optional(),
        Value::Bool(_) => Shape::primitive(PrimitiveKind::Boolean),
        Value::Number(_) => Shape::primitive(PrimitiveKind::Number),
        Value::String(_) => Shape::primitive(PrimitiveKind::String),
        Value::Array(items) => match items.first() {
            None => Shape::unknown().into_array(),
            Some(first) => analyze(first, field_hint).into_array(),
        },
        Value::Object(map) => Shape::object(
            map.iter()
                .map(|(name, child)| (name.clone(), analyze(child, name)))
                .collect(),
        ),
    };

    trace!(field = field_hint, shape = shape.describe(), "analyzed");
    shape
}
