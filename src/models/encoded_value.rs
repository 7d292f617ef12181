use crate::models::data_type::{DataKind, DataType};
use serde::{Deserialize, Serialize};

/// Wire-ready form of one parameter value.
///
/// Pairs the declared type with the raw byte sequences: exactly one entry
/// for a scalar, one entry per element for an array. A zero-length array is
/// a valid encoding with zero entries; null is encoded under the null kind
/// tag with a single empty entry, so the two remain distinguishable.
///
/// On the wire the byte sequences are carried as base64 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedValue {
    /// Declared type of the value
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Raw bytes, one entry per array element (or a single entry for scalars)
    #[serde(with = "base64_data")]
    pub data: Vec<Vec<u8>>,
}

impl EncodedValue {
    /// Number of byte-sequence entries.
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// True when this encodes a null value.
    pub fn is_null(&self) -> bool {
        self.data_type.kind == DataKind::Null
    }
}

/// Base64 (de)serialization for the data entries, matching the transport's
/// JSON envelope which cannot carry raw bytes.
mod base64_data {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<String> = data.iter().map(|entry| STANDARD.encode(entry)).collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|entry| STANDARD.decode(entry).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_serializes_as_base64() {
        let value = EncodedValue {
            data_type: DataType::text(),
            data: vec![b"hello".to_vec()],
        };

        let json = serde_json::to_string(&value).unwrap();
        assert!(json.contains("\"aGVsbG8=\""));
        assert!(json.contains("\"name\":\"text\""));

        let parsed: EncodedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_empty_array_keeps_zero_entries() {
        let value = EncodedValue {
            data_type: DataType::int().into_array(),
            data: vec![],
        };

        let json = serde_json::to_string(&value).unwrap();
        assert!(json.contains("\"data\":[]"));

        let parsed: EncodedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entry_count(), 0);
        assert!(!parsed.is_null());
    }
}
