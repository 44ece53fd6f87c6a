//! Self-describing JSON text codec.
//!
//! The wire envelope is a single root object with an `employee` array,
//! the same shape the schema-validated binary codec uses for its root
//! message, so sizes stay comparable across formats.

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::dataset::{Dataset, Record};
use crate::error::{DecodeError, EncodeError};

#[derive(Serialize)]
struct DocRef<'a> {
    employee: &'a [Record],
}

#[derive(Deserialize)]
struct DocOwned {
    #[serde(default)]
    employee: Vec<Record>,
}

pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(&DocRef {
            employee: dataset.records(),
        })
        .map_err(|e| EncodeError::Serialize(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Dataset, DecodeError> {
        let doc: DocOwned =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        Ok(Dataset::new(doc.employee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn round_trip_preserves_records() {
        let original = dataset::canonical();
        let bytes = JsonCodec.encode(&original).unwrap();
        let decoded = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn encode_is_deterministic() {
        let ds = dataset::canonical();
        assert_eq!(JsonCodec.encode(&ds).unwrap(), JsonCodec.encode(&ds).unwrap());
    }

    #[test]
    fn empty_dataset_is_well_defined() {
        let ds = Dataset::default();
        let bytes = JsonCodec.encode(&ds).unwrap();
        assert!(!bytes.is_empty());
        assert!(JsonCodec.decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = JsonCodec.decode(b"{\"employee\": [").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn envelope_uses_employee_root_field() {
        let bytes = JsonCodec.encode(&dataset::canonical()).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.starts_with("{\"employee\":["));
    }
}
