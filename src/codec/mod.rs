//! Codec adapters: one module per wire format behind a shared contract.

pub mod json;
pub mod proto;
pub mod xml;

use std::sync::Arc;

use crate::dataset::Dataset;
use crate::error::{DecodeError, EncodeError, VerificationError};
use crate::CodecKind;

pub use json::JsonCodec;
pub use proto::{FieldSchema, ProtoCodec};
pub use xml::XmlCodec;

/// Uniform contract every serialization format implements.
///
/// `encode` is a pure function of the dataset and includes every step
/// required to produce a complete decodable artifact (document wrapping,
/// schema guards); `decode` symmetrically includes unwrapping. Adapters
/// perform no file I/O.
pub trait Codec {
    /// Stable display name; also the registry key and baseline selector.
    fn name(&self) -> &'static str;

    /// Extension of the on-disk artifact (`data.<extension>`).
    fn file_extension(&self) -> &'static str;

    fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, EncodeError>;

    fn decode(&self, bytes: &[u8]) -> Result<Dataset, DecodeError>;

    /// Schema conformance check with a diagnostic on failure.
    /// Schema-less codecs accept every dataset.
    fn verify(&self, _dataset: &Dataset) -> Result<(), VerificationError> {
        Ok(())
    }
}

/// The registered codec set for a run, in registration order.
///
/// Registration order is load-bearing: it breaks ranking ties and puts the
/// baseline (JSON) first by convention.
pub fn registry(kind: CodecKind, schema: Arc<FieldSchema>) -> Vec<Box<dyn Codec>> {
    let mut out: Vec<Box<dyn Codec>> = Vec::new();

    if matches!(kind, CodecKind::All | CodecKind::Json) {
        out.push(Box::new(JsonCodec));
    }
    if matches!(kind, CodecKind::All | CodecKind::Xml) {
        out.push(Box::new(XmlCodec));
    }
    if matches!(kind, CodecKind::All | CodecKind::Proto) {
        out.push(Box::new(ProtoCodec::new(schema)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_stable() {
        let schema = Arc::new(FieldSchema::embedded().unwrap());
        let codecs = registry(CodecKind::All, schema);
        let names: Vec<&str> = codecs.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["json", "xml", "proto"]);
    }

    #[test]
    fn registry_single_kind() {
        let schema = Arc::new(FieldSchema::embedded().unwrap());
        let codecs = registry(CodecKind::Proto, schema);
        assert_eq!(codecs.len(), 1);
        assert_eq!(codecs[0].name(), "proto");
    }
}
