//! Event document capability.
//!
//! The engine touches event documents only through [`EventRead`]: a total,
//! fallible-by-`Option` lookup of a typed leaf view, plus a presence check.
//! Swapping the underlying document representation means implementing this
//! trait and nothing else.
//!
//! Lookup is total by contract: a missing path, an index out of range, or a
//! traversal through a scalar all return `None` rather than failing. That is
//! what lets predicates collapse every runtime resolution problem into a
//! clean `false`.

use serde_json::Value;

/// Read capability the engine requires from an event document.
pub trait EventRead {
    /// The value at `path` (canonical pointer form), if present.
    fn lookup(&self, path: &str) -> Option<Leaf<'_>>;

    /// Whether anything is present at `path`, including explicit nulls.
    fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }
}

/// Leaf kinds an event document can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Int,
    Bool,
    Null,
    Object,
    Array,
}

/// Borrowed view of a value found in an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf<'a> {
    /// UTF-8 string leaf.
    Str(&'a str),
    /// Number exactly representable as a signed 64-bit integer.
    Int(i64),
    /// Number outside the exact i64 range (fractional or too large).
    /// Present for existence checks but yields no typed value.
    Inexact,
    Bool(bool),
    Null,
    /// Interior object node.
    Object,
    /// Interior array node.
    Array,
}

impl<'a> Leaf<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Leaf::Str(_) => Kind::Str,
            Leaf::Int(_) | Leaf::Inexact => Kind::Int,
            Leaf::Bool(_) => Kind::Bool,
            Leaf::Null => Kind::Null,
            Leaf::Object => Kind::Object,
            Leaf::Array => Kind::Array,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Leaf::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Leaf::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Reference implementation of [`EventRead`] over a JSON document.
///
/// Canonical paths are resolved as RFC 6901 JSON Pointers, so `~0`/`~1`
/// escapes and decimal array indices behave as the standard prescribes.
#[derive(Debug, Clone, Copy)]
pub struct JsonEvent<'a> {
    doc: &'a Value,
}

impl<'a> JsonEvent<'a> {
    /// Wrap a JSON value as an event.
    pub fn from_value(doc: &'a Value) -> Self {
        JsonEvent { doc }
    }
}

impl EventRead for JsonEvent<'_> {
    fn lookup(&self, path: &str) -> Option<Leaf<'_>> {
        self.doc.pointer(path).map(leaf_of)
    }

    fn has(&self, path: &str) -> bool {
        self.doc.pointer(path).is_some()
    }
}

fn leaf_of(v: &Value) -> Leaf<'_> {
    match v {
        Value::String(s) => Leaf::Str(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Leaf::Int(i),
            None => Leaf::Inexact,
        },
        Value::Bool(b) => Leaf::Bool(*b),
        Value::Null => Leaf::Null,
        Value::Object(_) => Leaf::Object,
        Value::Array(_) => Leaf::Array,
    }
}
