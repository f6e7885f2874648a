//! Self-describing property values and their structural comparison.
//!
//! Every property of a setting holds a [`Value`]: a closed tagged union
//! over scalars, strings and nested containers. The tag is fixed when the
//! value is built and determines how two values are ordered by the
//! [`Comparator`].

mod compare;


pub use compare::{Comparator, DEFAULT_FLOAT_TOLERANCE, compare, compare_optional};

use std::{collections::BTreeMap, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// String-keyed map of values. Keys iterate in sorted order.
pub type ValueMap = BTreeMap<String, Value>;

/// A dynamically typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Unsigned 64-bit integer.
    Unsigned(u64),
    /// Double precision float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of strings.
    StringList(Vec<String>),
    /// Ordered sequence of raw bytes.
    ByteArray(Vec<u8>),
    /// Ordered sequence of heterogeneous values.
    List(Vec<Value>),
    /// String-keyed mapping to values.
    Map(ValueMap),
    /// A boxed value, unwrapped by one level when compared.
    Nested(Box<Value>),
    /// Reserved record kind. Carried and serialized, but not comparable.
    Struct(Vec<Value>),
}

/// Tag of a [`Value`].
///
/// The declaration order is the ordinal used to order values of different
/// kinds. It carries no meaning beyond being fixed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Unsigned`]
    Unsigned,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::StringList`]
    StringList,
    /// [`Value::ByteArray`]
    ByteArray,
    /// [`Value::List`]
    List,
    /// [`Value::Map`]
    Map,
    /// [`Value::Nested`]
    Nested,
    /// [`Value::Struct`]
    Struct,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Integer => "int64",
            ValueKind::Unsigned => "uint64",
            ValueKind::Float => "double",
            ValueKind::String => "string",
            ValueKind::StringList => "string-list",
            ValueKind::ByteArray => "byte-array",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Nested => "nested",
            ValueKind::Struct => "struct",
        };
        write!(f, "{name}")
    }
}

impl Value {
    /// Returns the tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Unsigned(_) => ValueKind::Unsigned,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::StringList(_) => ValueKind::StringList,
            Value::ByteArray(_) => ValueKind::ByteArray,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Nested(_) => ValueKind::Nested,
            Value::Struct(_) => ValueKind::Struct,
        }
    }

    /// Whether the value holds no content.
    ///
    /// Strings and containers are empty when they have no elements. Scalars
    /// always carry content and are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Bool(_) | Value::Integer(_) | Value::Unsigned(_) | Value::Float(_) => false,
            Value::String(s) => s.is_empty(),
            Value::StringList(items) => items.is_empty(),
            Value::ByteArray(bytes) => bytes.is_empty(),
            Value::List(items) | Value::Struct(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Nested(inner) => inner.is_empty(),
        }
    }

    /// Whether every float in the value tree is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Float(x) => x.is_finite(),
            Value::List(items) | Value::Struct(items) => items.iter().all(Value::is_finite),
            Value::Map(map) => map.values().all(Value::is_finite),
            Value::Nested(inner) => inner.is_finite(),
            _ => true,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Integer`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Unsigned`].
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the float if this is a [`Value::Float`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the strings if this is a [`Value::StringList`].
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Value::StringList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the bytes if this is a [`Value::ByteArray`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Unsigned(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::StringList(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::ByteArray(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Unsigned(u) => write!(f, "{u}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "'{s}'"),
            Value::StringList(items) => write!(f, "[{}]", items.join(", ")),
            Value::ByteArray(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
                write!(f, "{}", hex.join(":"))
            }
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Value::Nested(inner) => write!(f, "<{inner}>"),
            Value::Struct(items) => {
                let parts: Vec<String> = items.iter().map(Value::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
