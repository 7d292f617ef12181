//! Typed value codec: native values to wire bytes and back.
//!
//! Every per-kind encoding is a pure, deterministic byte-producing function.
//! No framing is added at this layer; the transport envelope owns framing.
//! [`decode`] is the exact left inverse of [`encode`] for every value
//! representable by the declared type.
//!
//! Byte layouts:
//! - BOOLEAN: one byte, `0x00` or `0x01`
//! - INT8: 8-byte big-endian two's complement
//! - DECIMAL: ASCII digit string with explicit leading sign and explicit
//!   scale even for integral values (`+5.00`)
//! - UUID: 16-byte canonical form
//! - TEXT: raw UTF-8 bytes
//! - BLOB: raw bytes
//! - NULL: a single empty entry under the null kind tag

use crate::error::{Result, TroveLinkError};
use crate::models::{DataKind, DataType, EncodedValue, NativeValue};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Encode a single value against its declared type.
///
/// Convenience wrapper over [`encode_param`] for callers outside the
/// reconciler; diagnostics name the parameter `value`.
pub fn encode(value: &NativeValue, data_type: &DataType) -> Result<EncodedValue> {
    encode_param("value", value, data_type)
}

/// Encode a single value against its declared type, labelling failures
/// with the parameter's name or index.
pub fn encode_param(param: &str, value: &NativeValue, data_type: &DataType) -> Result<EncodedValue> {
    // Null always encodes under the null kind tag, whatever the declared
    // type; the remote treats null as untyped.
    if matches!(value, NativeValue::Null) {
        return Ok(EncodedValue {
            data_type: DataType::null(),
            data: vec![Vec::new()],
        });
    }
    if data_type.kind == DataKind::Null {
        return Err(mismatch(param, value, data_type));
    }

    if data_type.is_array {
        let NativeValue::Array(elems) = value else {
            return Err(mismatch(param, value, data_type));
        };
        let data = elems
            .iter()
            .map(|elem| encode_scalar(param, elem, data_type))
            .collect::<Result<Vec<_>>>()?;
        Ok(EncodedValue {
            data_type: data_type.clone(),
            data,
        })
    } else {
        if matches!(value, NativeValue::Array(_)) {
            return Err(mismatch(param, value, data_type));
        }
        let bytes = encode_scalar(param, value, data_type)?;
        Ok(EncodedValue {
            data_type: data_type.clone(),
            data: vec![bytes],
        })
    }
}

/// Decode an encoded value back into its native form.
///
/// Exact left inverse of [`encode`]: for every type `t` and value `v`
/// representable by `t`, `decode(&encode(&v, &t)?)? == v`.
pub fn decode(value: &EncodedValue) -> Result<NativeValue> {
    let data_type = &value.data_type;
    if data_type.kind == DataKind::Null {
        return Ok(NativeValue::Null);
    }
    if data_type.is_array {
        let elems = value
            .data
            .iter()
            .map(|entry| decode_scalar(data_type, entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(NativeValue::Array(elems))
    } else {
        let [entry] = value.data.as_slice() else {
            return Err(TroveLinkError::MalformedEncoding {
                declared: data_type.sql_name(),
                reason: format!("expected 1 data entry, found {}", value.data.len()),
            });
        };
        decode_scalar(data_type, entry)
    }
}

fn encode_scalar(param: &str, value: &NativeValue, data_type: &DataType) -> Result<Vec<u8>> {
    match data_type.kind {
        DataKind::Text => match value {
            NativeValue::Text(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(mismatch(param, value, data_type)),
        },
        DataKind::Boolean => match value {
            NativeValue::Bool(b) => Ok(vec![*b as u8]),
            _ => Err(mismatch(param, value, data_type)),
        },
        DataKind::Int => encode_int(param, value, data_type),
        DataKind::Decimal => encode_decimal(param, value, data_type),
        DataKind::Blob => match value {
            NativeValue::Blob(bytes) => Ok(bytes.clone()),
            _ => Err(mismatch(param, value, data_type)),
        },
        DataKind::Uuid => match value {
            NativeValue::Uuid(u) => Ok(u.as_bytes().to_vec()),
            NativeValue::Text(s) => {
                let u = Uuid::try_parse(s).map_err(|_| TroveLinkError::MalformedUuid {
                    param: param.to_string(),
                    input: s.clone(),
                })?;
                Ok(u.as_bytes().to_vec())
            }
            _ => Err(mismatch(param, value, data_type)),
        },
        // Nulls never reach the scalar path
        DataKind::Null => Err(mismatch(param, value, data_type)),
    }
}

fn encode_int(param: &str, value: &NativeValue, data_type: &DataType) -> Result<Vec<u8>> {
    let i = match value {
        NativeValue::Int(i) => *i,
        NativeValue::Float(f) => {
            if f.fract() != 0.0 || *f < i64::MIN as f64 || *f > i64::MAX as f64 {
                return Err(out_of_range(param, &format!("{}", f), data_type));
            }
            *f as i64
        }
        NativeValue::Decimal(d) => {
            if !d.is_integer() {
                return Err(out_of_range(param, &d.to_string(), data_type));
            }
            d.to_i64()
                .ok_or_else(|| out_of_range(param, &d.to_string(), data_type))?
        }
        _ => return Err(mismatch(param, value, data_type)),
    };
    Ok(i.to_be_bytes().to_vec())
}

fn encode_decimal(param: &str, value: &NativeValue, data_type: &DataType) -> Result<Vec<u8>> {
    let d = match value {
        NativeValue::Decimal(d) => *d,
        NativeValue::Int(i) => Decimal::from(*i),
        NativeValue::Float(f) => Decimal::from_f64_retain(*f)
            .ok_or_else(|| out_of_range(param, &format!("{}", f), data_type))?,
        NativeValue::Text(s) => {
            s.parse::<Decimal>().map_err(|_| TroveLinkError::MalformedDecimal {
                param: param.to_string(),
                input: s.clone(),
            })?
        }
        _ => return Err(mismatch(param, value, data_type)),
    };
    decimal_bytes(param, d, data_type)
}

/// Normalized digit-string encoding with explicit sign and scale.
fn decimal_bytes(param: &str, mut d: Decimal, data_type: &DataType) -> Result<Vec<u8>> {
    if let Some((precision, scale)) = data_type.metadata {
        if d.scale() > scale as u32 {
            // Rounding to the declared scale would be a silent coercion.
            return Err(out_of_range(param, &d.to_string(), data_type));
        }
        d.rescale(scale as u32);
        let digits = d.mantissa().unsigned_abs().to_string().len() as u16;
        if digits > precision {
            return Err(out_of_range(param, &d.to_string(), data_type));
        }
    }
    let sign = if d.is_sign_negative() { '-' } else { '+' };
    Ok(format!("{}{}", sign, d.abs()).into_bytes())
}

fn decode_scalar(data_type: &DataType, bytes: &[u8]) -> Result<NativeValue> {
    let malformed = |reason: String| TroveLinkError::MalformedEncoding {
        declared: data_type.sql_name(),
        reason,
    };
    match data_type.kind {
        DataKind::Text => String::from_utf8(bytes.to_vec())
            .map(NativeValue::Text)
            .map_err(|e| malformed(e.to_string())),
        DataKind::Boolean => match bytes {
            [0x00] => Ok(NativeValue::Bool(false)),
            [0x01] => Ok(NativeValue::Bool(true)),
            _ => Err(malformed(format!("{} byte(s) for boolean", bytes.len()))),
        },
        DataKind::Int => {
            let raw: [u8; 8] = bytes
                .try_into()
                .map_err(|_| malformed(format!("{} byte(s) for int8", bytes.len())))?;
            Ok(NativeValue::Int(i64::from_be_bytes(raw)))
        }
        DataKind::Decimal => {
            let text = std::str::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;
            let (sign, digits) = match text.as_bytes().first() {
                Some(&b'+') => (false, &text[1..]),
                Some(&b'-') => (true, &text[1..]),
                _ => return Err(malformed("missing sign".to_string())),
            };
            let d = digits
                .parse::<Decimal>()
                .map_err(|e| malformed(e.to_string()))?;
            Ok(NativeValue::Decimal(if sign { -d } else { d }))
        }
        DataKind::Blob => Ok(NativeValue::Blob(bytes.to_vec())),
        DataKind::Uuid => Uuid::from_slice(bytes)
            .map(NativeValue::Uuid)
            .map_err(|_| malformed(format!("{} byte(s) for uuid", bytes.len()))),
        DataKind::Null => Ok(NativeValue::Null),
    }
}

fn mismatch(param: &str, value: &NativeValue, data_type: &DataType) -> TroveLinkError {
    TroveLinkError::TypeMismatch {
        param: param.to_string(),
        value: value.kind_name().to_string(),
        declared: data_type.sql_name(),
    }
}

fn out_of_range(param: &str, value: &str, data_type: &DataType) -> TroveLinkError {
    TroveLinkError::OutOfRange {
        param: param.to_string(),
        value: value.to_string(),
        declared: data_type.sql_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: NativeValue, data_type: DataType) {
        let encoded = encode(&value, &data_type).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, value, "round trip for {}", data_type);
    }

    #[test]
    fn test_scalar_round_trips() {
        round_trip(NativeValue::Text("hello".into()), DataType::text());
        round_trip(NativeValue::Text("".into()), DataType::text());
        round_trip(NativeValue::Bool(true), DataType::boolean());
        round_trip(NativeValue::Bool(false), DataType::boolean());
        round_trip(NativeValue::Int(0), DataType::int());
        round_trip(NativeValue::Int(i64::MIN), DataType::int());
        round_trip(NativeValue::Int(i64::MAX), DataType::int());
        round_trip(NativeValue::Blob(vec![0, 1, 255]), DataType::blob());
        round_trip(
            NativeValue::Uuid("f47ac10b-58cc-4372-a567-0e02b2c3d479".parse().unwrap()),
            DataType::uuid(),
        );
        round_trip(
            NativeValue::Decimal("-123.45".parse().unwrap()),
            DataType::decimal(),
        );
    }

    #[test]
    fn test_array_round_trips() {
        round_trip(
            NativeValue::Array(vec![NativeValue::Int(1), NativeValue::Int(2)]),
            DataType::int().into_array(),
        );
        round_trip(NativeValue::Array(vec![]), DataType::text().into_array());
    }

    #[test]
    fn test_int_is_eight_byte_big_endian() {
        let encoded = encode(&NativeValue::Int(1), &DataType::int()).unwrap();
        assert_eq!(encoded.data, vec![vec![0, 0, 0, 0, 0, 0, 0, 1]]);
    }

    #[test]
    fn test_decimal_carries_sign_and_scale() {
        let d: Decimal = "5".parse().unwrap();
        let encoded = encode(
            &NativeValue::Decimal(d),
            &DataType::decimal_with(10, 2),
        )
        .unwrap();
        assert_eq!(encoded.data, vec![b"+5.00".to_vec()]);

        let encoded = encode(
            &NativeValue::Decimal("-0.5".parse().unwrap()),
            &DataType::decimal(),
        )
        .unwrap();
        assert_eq!(encoded.data, vec![b"-0.5".to_vec()]);
    }

    #[test]
    fn test_decimal_precision_enforced() {
        // 4 integer digits do not fit DECIMAL(5,2)
        let err = encode(
            &NativeValue::Decimal("1234.56".parse().unwrap()),
            &DataType::decimal_with(5, 2),
        )
        .unwrap_err();
        assert!(matches!(err, TroveLinkError::OutOfRange { .. }));

        // Excess scale is rejected rather than silently rounded
        let err = encode(
            &NativeValue::Decimal("1.234".parse().unwrap()),
            &DataType::decimal_with(10, 2),
        )
        .unwrap_err();
        assert!(matches!(err, TroveLinkError::OutOfRange { .. }));
    }

    #[test]
    fn test_uuid_from_string_and_malformed() {
        let encoded = encode(
            &NativeValue::Text("f47ac10b-58cc-4372-a567-0e02b2c3d479".into()),
            &DataType::uuid(),
        )
        .unwrap();
        assert_eq!(encoded.data[0].len(), 16);

        let err = encode(&NativeValue::Text("not-a-uuid".into()), &DataType::uuid()).unwrap_err();
        assert!(matches!(err, TroveLinkError::MalformedUuid { .. }));
    }

    #[test]
    fn test_decimal_from_string_and_malformed() {
        let encoded = encode(&NativeValue::Text("100.50".into()), &DataType::decimal()).unwrap();
        assert_eq!(encoded.data, vec![b"+100.50".to_vec()]);

        let err =
            encode(&NativeValue::Text("1.2.3".into()), &DataType::decimal()).unwrap_err();
        assert!(matches!(err, TroveLinkError::MalformedDecimal { .. }));
    }

    #[test]
    fn test_shape_mismatches() {
        // scalar against array type
        let err = encode(&NativeValue::Int(1), &DataType::int().into_array()).unwrap_err();
        assert!(matches!(err, TroveLinkError::TypeMismatch { .. }));

        // array against scalar type
        let err = encode(
            &NativeValue::Array(vec![NativeValue::Int(1)]),
            &DataType::int(),
        )
        .unwrap_err();
        assert!(matches!(err, TroveLinkError::TypeMismatch { .. }));

        // wrong scalar kind, never coerced
        let err = encode(&NativeValue::Text("42".into()), &DataType::int()).unwrap_err();
        assert!(matches!(err, TroveLinkError::TypeMismatch { .. }));
    }

    #[test]
    fn test_null_distinguishable_from_empty_text() {
        let null = encode(&NativeValue::Null, &DataType::text()).unwrap();
        let empty = encode(&NativeValue::Text("".into()), &DataType::text()).unwrap();
        assert_ne!(null, empty);
        assert!(null.is_null());
        assert_eq!(decode(&null).unwrap(), NativeValue::Null);
        assert_eq!(decode(&empty).unwrap(), NativeValue::Text("".into()));
    }

    #[test]
    fn test_float_widening_into_int() {
        let encoded = encode(&NativeValue::Float(42.0), &DataType::int()).unwrap();
        assert_eq!(decode(&encoded).unwrap(), NativeValue::Int(42));

        let err = encode(&NativeValue::Float(1.5), &DataType::int()).unwrap_err();
        assert!(matches!(err, TroveLinkError::OutOfRange { .. }));
    }

    #[test]
    fn test_error_carries_parameter_label() {
        let err = encode_param("$id", &NativeValue::Text("nope".into()), &DataType::uuid())
            .unwrap_err();
        match err {
            TroveLinkError::MalformedUuid { param, .. } => assert_eq!(param, "$id"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_wrong_entry_count() {
        let bad = EncodedValue {
            data_type: DataType::int(),
            data: vec![],
        };
        assert!(matches!(
            decode(&bad),
            Err(TroveLinkError::MalformedEncoding { .. })
        ));
    }
}
