use crate::error::{Result, TroveLinkError};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Caller-supplied value in host representation.
///
/// A closed tagged union over the value kinds the encoding engine supports:
/// scalars plus homogeneous arrays of scalars. Values are held transiently
/// for the duration of one encoding call; the engine never retains them.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// Null / absent value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Floating point number (from loosely-typed callers; encodes as
    /// integer when integral and in safe range, decimal otherwise)
    Float(f64),
    /// Fixed-point decimal
    Decimal(Decimal),
    /// UTF-8 string
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// UUID
    Uuid(Uuid),
    /// Ordered sequence of scalars
    Array(Vec<NativeValue>),
}

impl NativeValue {
    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) => "int",
            NativeValue::Float(_) => "float",
            NativeValue::Decimal(_) => "decimal",
            NativeValue::Text(_) => "text",
            NativeValue::Blob(_) => "blob",
            NativeValue::Uuid(_) => "uuid",
            NativeValue::Array(_) => "array",
        }
    }

    /// True for every variant except `Array`.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, NativeValue::Array(_))
    }

    /// Convert a loosely-typed JSON value into a NativeValue.
    ///
    /// Numbers become `Int` when they are integral and fit in an i64,
    /// `Decimal` otherwise. Objects have no mapping and fail with
    /// [`TroveLinkError::UnsupportedValueKind`].
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(NativeValue::Null),
            JsonValue::Bool(b) => Ok(NativeValue::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(NativeValue::Int(i))
                } else if let Some(u) = n.as_u64() {
                    // Beyond i64::MAX; decimal keeps full precision
                    Ok(NativeValue::Decimal(Decimal::from(u)))
                } else if let Some(f) = n.as_f64() {
                    let d = Decimal::from_f64_retain(f).ok_or_else(|| {
                        TroveLinkError::UnsupportedValueKind(format!("number {}", f))
                    })?;
                    Ok(NativeValue::Decimal(d))
                } else {
                    Err(TroveLinkError::UnsupportedValueKind(format!(
                        "number {}",
                        n
                    )))
                }
            }
            JsonValue::String(s) => Ok(NativeValue::Text(s.clone())),
            JsonValue::Array(items) => {
                let elems = items
                    .iter()
                    .map(NativeValue::from_json)
                    .collect::<Result<Vec<_>>>()?;
                Ok(NativeValue::Array(elems))
            }
            JsonValue::Object(_) => Err(TroveLinkError::UnsupportedValueKind(
                "object".to_string(),
            )),
        }
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Text(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Text(s)
    }
}

impl From<i64> for NativeValue {
    fn from(i: i64) -> Self {
        NativeValue::Int(i)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(bytes: Vec<u8>) -> Self {
        NativeValue::Blob(bytes)
    }
}

impl From<Uuid> for NativeValue {
    fn from(u: Uuid) -> Self {
        NativeValue::Uuid(u)
    }
}

impl From<Decimal> for NativeValue {
    fn from(d: Decimal) -> Self {
        NativeValue::Decimal(d)
    }
}
