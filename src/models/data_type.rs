use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kind within the TroveDB type system.
///
/// Each kind has an associated tag byte for wire format identification:
/// - NULL = 0x00 (untyped null marker)
/// - TEXT = 0x01 (UTF-8 string)
/// - INT = 0x02 (64-bit signed integer)
/// - BOOLEAN = 0x03
/// - DECIMAL = 0x04 (fixed-point, optional precision/scale metadata)
/// - BLOB = 0x05 (binary data)
/// - UUID = 0x06 (128-bit universally unique identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    /// Untyped null marker (0x00). Valid only when paired with a null value.
    Null,
    /// UTF-8 string (0x01)
    Text,
    /// 64-bit signed integer (0x02)
    Int,
    /// Boolean (0x03)
    Boolean,
    /// Fixed-point decimal (0x04)
    Decimal,
    /// Binary data (0x05)
    Blob,
    /// UUID (0x06)
    Uuid,
}

impl DataKind {
    /// Wire format tag byte for this kind.
    pub fn tag(&self) -> u8 {
        match self {
            DataKind::Null => 0x00,
            DataKind::Text => 0x01,
            DataKind::Int => 0x02,
            DataKind::Boolean => 0x03,
            DataKind::Decimal => 0x04,
            DataKind::Blob => 0x05,
            DataKind::Uuid => 0x06,
        }
    }

    /// Create a DataKind from a wire format tag.
    pub fn from_tag(tag: u8) -> Result<Self, String> {
        match tag {
            0x00 => Ok(DataKind::Null),
            0x01 => Ok(DataKind::Text),
            0x02 => Ok(DataKind::Int),
            0x03 => Ok(DataKind::Boolean),
            0x04 => Ok(DataKind::Decimal),
            0x05 => Ok(DataKind::Blob),
            0x06 => Ok(DataKind::Uuid),
            _ => Err(format!("unknown type tag: 0x{:02X}", tag)),
        }
    }

    /// SQL type name for display.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataKind::Null => "NULL",
            DataKind::Text => "TEXT",
            DataKind::Int => "INT8",
            DataKind::Boolean => "BOOLEAN",
            DataKind::Decimal => "DECIMAL",
            DataKind::Blob => "BLOB",
            DataKind::Uuid => "UUID",
        }
    }
}

/// Declared type of a procedure parameter.
///
/// The descriptor is immutable once constructed. Two types are equal iff
/// kind, array-ness, and metadata all match.
///
/// # Example JSON
///
/// ```json
/// {"name": "text", "is_array": false}
/// {"name": "decimal", "is_array": false, "metadata": [10, 2]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// Scalar kind
    #[serde(rename = "name")]
    pub kind: DataKind,

    /// Whether this type is a homogeneous array of the scalar kind
    #[serde(default)]
    pub is_array: bool,

    /// Kind-specific metadata: `(precision, scale)` for decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<(u16, u16)>,
}

impl DataType {
    /// Scalar type with no metadata.
    pub fn scalar(kind: DataKind) -> Self {
        Self {
            kind,
            is_array: false,
            metadata: None,
        }
    }

    /// The untyped null marker.
    pub fn null() -> Self {
        Self::scalar(DataKind::Null)
    }

    pub fn text() -> Self {
        Self::scalar(DataKind::Text)
    }

    pub fn int() -> Self {
        Self::scalar(DataKind::Int)
    }

    pub fn boolean() -> Self {
        Self::scalar(DataKind::Boolean)
    }

    pub fn blob() -> Self {
        Self::scalar(DataKind::Blob)
    }

    pub fn uuid() -> Self {
        Self::scalar(DataKind::Uuid)
    }

    /// Unconstrained decimal (no precision/scale enforcement).
    pub fn decimal() -> Self {
        Self::scalar(DataKind::Decimal)
    }

    /// Decimal constrained to `precision` total digits and `scale`
    /// fractional digits.
    pub fn decimal_with(precision: u16, scale: u16) -> Self {
        Self {
            kind: DataKind::Decimal,
            is_array: false,
            metadata: Some((precision, scale)),
        }
    }

    /// Array variant of this type, keeping kind and metadata.
    pub fn into_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// SQL-style display name, e.g. `TEXT` or `INT8[]`.
    pub fn sql_name(&self) -> String {
        let base = match (self.kind, self.metadata) {
            (DataKind::Decimal, Some((p, s))) => format!("DECIMAL({},{})", p, s),
            (kind, _) => kind.sql_name().to_string(),
        };
        if self.is_array {
            format!("{}[]", base)
        } else {
            base
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}
