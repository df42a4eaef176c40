pub(crate) mod reader;

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Key under which element text content is stored when the element also
/// carries attributes or children.
pub(crate) const TEXT_KEY: &str = "#text";

/// Untyped view of the parsed document.
///
/// XML allows most tags to repeat 0..N times, so a child is either a single
/// value or a list depending on how often the tag occurred. Text-only
/// elements and attribute values collapse to `Text`; elements with
/// attributes or children become a `Node` with the text content (if any)
/// stored under `#text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Node(HashMap<String, Value>),
    List(Vec<Value>),
}

impl Value {
    /// Guarded child access. Absent keys and non-node values yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Node(map) => map.get(key),
            _ => None,
        }
    }

    /// Unguarded child access. Failing here terminates the load.
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| Error::MissingField(key.to_string()))
    }

    /// Coerce to a sequence: a list yields its members, anything else is
    /// wrapped as a one-element sequence. Empty-text members are dropped,
    /// matching the translator's historical array coercion.
    pub fn as_sequence(&self) -> Vec<&Value> {
        let items: Vec<&Value> = match self {
            Value::List(items) => items.iter().collect(),
            other => vec![other],
        };
        items.into_iter().filter(|v| !v.is_empty_text()).collect()
    }

    fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(text) if text.is_empty())
    }

    /// Text content of this value: the text itself, or the `#text` payload
    /// of a node.
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Node(map) => match map.get(TEXT_KEY) {
                Some(Value::Text(text)) => Some(text),
                _ => None,
            },
            Value::List(_) => None,
        }
    }

    /// Text of a named child or attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::text)
    }

    /// Numeric attribute, `None` when absent or unparseable.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(|text| text.trim().parse().ok())
    }

    /// Boolean attribute; only the literal `true` counts.
    pub fn flag(&self, key: &str) -> bool {
        self.attr(key) == Some("true")
    }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a drawable region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box, used for label placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Normalized connector classification.
///
/// The raw field is polymorphic: either bare text or a structured value
/// carrying an `exclusive` attribute next to the text payload. Both collapse
/// to the same kind here, differing only in the exclusivity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorType {
    pub kind: String,
    pub exclusive: bool,
}

impl ConnectorType {
    /// The one place both raw representations are resolved.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(kind) => Some(Self {
                kind: kind.clone(),
                exclusive: false,
            }),
            Value::Node(_) => Some(Self {
                kind: value.text()?.to_string(),
                exclusive: value.flag("exclusive"),
            }),
            Value::List(_) => None,
        }
    }
}
