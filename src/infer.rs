//! Type inference for caller values that carry no declared type.
//!
//! Maps each native value kind onto the most specific TroveDB type the wire
//! encoding can represent. Inference never guesses: ambiguous inputs (null,
//! empty arrays) fail and require an explicit type hint from the caller.

use crate::error::{Result, TroveLinkError};
use crate::models::{DataKind, DataType, NativeValue};
use uuid::Uuid;

/// Infer the most specific [`DataType`] for a native value.
///
/// Scalars map via a fixed table; a non-empty array infers its element type
/// from the first element and requires every other element to agree.
///
/// # Errors
///
/// - [`TroveLinkError::AmbiguousNull`] for null with no hint available
/// - [`TroveLinkError::AmbiguousEmptyArray`] for an empty array
/// - [`TroveLinkError::HeterogeneousArray`] for mixed element types
/// - [`TroveLinkError::UnsupportedValueKind`] for nested arrays
pub fn infer(value: &NativeValue) -> Result<DataType> {
    match value {
        NativeValue::Array(elems) => {
            if elems.is_empty() {
                return Err(TroveLinkError::AmbiguousEmptyArray);
            }
            let first = infer_scalar_kind(&elems[0])?;
            for (index, elem) in elems.iter().enumerate().skip(1) {
                let kind = infer_scalar_kind(elem)?;
                if kind != first {
                    return Err(TroveLinkError::HeterogeneousArray {
                        first: first.sql_name().to_string(),
                        index,
                        found: kind.sql_name().to_string(),
                    });
                }
            }
            Ok(DataType::scalar(first).into_array())
        }
        scalar => infer_scalar_kind(scalar).map(DataType::scalar),
    }
}

/// Fixed scalar mapping table.
fn infer_scalar_kind(value: &NativeValue) -> Result<DataKind> {
    match value {
        NativeValue::Null => Err(TroveLinkError::AmbiguousNull),
        NativeValue::Bool(_) => Ok(DataKind::Boolean),
        NativeValue::Int(_) => Ok(DataKind::Int),
        NativeValue::Float(f) => {
            // Integral and within the safe integer range maps to INT8;
            // everything else needs decimal precision.
            if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
                Ok(DataKind::Int)
            } else {
                Ok(DataKind::Decimal)
            }
        }
        NativeValue::Decimal(_) => Ok(DataKind::Decimal),
        NativeValue::Text(s) => {
            if is_uuid_shaped(s) {
                Ok(DataKind::Uuid)
            } else {
                Ok(DataKind::Text)
            }
        }
        NativeValue::Blob(_) => Ok(DataKind::Blob),
        NativeValue::Uuid(_) => Ok(DataKind::Uuid),
        NativeValue::Array(_) => Err(TroveLinkError::UnsupportedValueKind(
            "nested array".to_string(),
        )),
    }
}

/// Largest f64 that still represents every integer exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Recognize the canonical 36-character hyphenated hex form.
fn is_uuid_shaped(s: &str) -> bool {
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}
