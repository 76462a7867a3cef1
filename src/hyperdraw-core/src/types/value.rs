//! Runtime value representation.

use std::collections::HashMap;

use common_error::{HyperdrawError, HyperdrawResult};
use serde::{Deserialize, Serialize};

use crate::store::NodeId;

/// Map of metadata keys to values.
pub type PropertyMap = HashMap<String, Value>;

/// Metadata value attached to a node or hyperedge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// List of values.
    List(Vec<Value>),
    /// Map of string keys to values.
    Map(HashMap<String, Value>),
}

impl Value {
    /// Try to get as i64.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int64(_) => "Int64",
            Self::Float64(_) => "Float64",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
        }
    }
}

const NODE_KIND: &str = "kind";
const NODE_ID: &str = "id";

/// Tagged encoding of a node id, so synthetic and caller-supplied ids that
/// display alike stay distinct. Synthetic counters are stored bit-for-bit.
impl From<&NodeId> for Value {
    fn from(node: &NodeId) -> Self {
        let (kind, id) = match node {
            NodeId::Int(i) => ("int", Self::Int64(*i)),
            NodeId::Name(name) => ("name", Self::String(name.clone())),
            NodeId::Fusion(n) => ("fusion", Self::Int64(*n as i64)),
            NodeId::Dummy(n) => ("dummy", Self::Int64(*n as i64)),
        };
        Self::Map(HashMap::from([
            (NODE_KIND.to_string(), Self::from(kind)),
            (NODE_ID.to_string(), id),
        ]))
    }
}

impl TryFrom<&Value> for NodeId {
    type Error = HyperdrawError;

    fn try_from(value: &Value) -> HyperdrawResult<Self> {
        let malformed = || {
            HyperdrawError::invalid_parameter(format!(
                "{} value does not encode a node id",
                value.type_name()
            ))
        };
        let Value::Map(fields) = value else {
            return Err(malformed());
        };
        let kind = fields.get(NODE_KIND).and_then(Value::as_str);
        let id = fields.get(NODE_ID).ok_or_else(malformed)?;
        let node = match kind {
            Some("int") => id.as_int64().map(NodeId::Int),
            Some("name") => id.as_str().map(NodeId::from),
            Some("fusion") => id.as_int64().map(|n| NodeId::Fusion(n as u64)),
            Some("dummy") => id.as_int64().map(|n| NodeId::Dummy(n as u64)),
            _ => None,
        };
        node.ok_or_else(malformed)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
