//! Error taxonomy for the benchmark run.
//!
//! Schema failures abort the whole run before any benchmarking starts.
//! Encode/decode/verification failures are fatal to one codec's benchmark
//! only; the suite runner wraps them in [`BenchmarkError`] and keeps going
//! with the remaining codecs.

use thiserror::Error;

/// Failure loading the schema resource. Fatal to the entire run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema resource `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schema resource is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),

    #[error("schema declares no field rules")]
    Empty,

    #[error("schema rule `{constraint}` does not apply to field `{field}`")]
    UnsupportedRule { field: String, constraint: String },
}

/// Adapter failure while producing bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The dataset violates a codec-specific structural constraint. Raised
    /// before any bytes are produced; encoding never silently truncates.
    #[error("dataset does not conform to the codec schema: {diagnostic}")]
    SchemaMismatch { diagnostic: String },

    #[error("serializer failure: {0}")]
    Serialize(String),
}

/// Adapter failure while reconstructing a dataset from bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Round-trip or schema verification failure for one codec.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("decoded record count {actual} does not match original {expected}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("schema verification failed: {diagnostic}")]
    Schema { diagnostic: String },
}

/// Any per-codec failure mode the runner isolates.
#[derive(Debug, Error)]
pub enum CodecFailure {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

/// One codec's benchmark aborted. Other codecs are unaffected.
#[derive(Debug, Error)]
#[error("benchmark for codec `{codec}` failed: {cause}")]
pub struct BenchmarkError {
    pub codec: String,
    #[source]
    pub cause: CodecFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_error_names_the_codec() {
        let err = BenchmarkError {
            codec: "xml".to_string(),
            cause: CodecFailure::Verification(VerificationError::CountMismatch {
                expected: 3,
                actual: 2,
            }),
        };

        let msg = err.to_string();
        assert!(msg.contains("xml"));
        assert!(msg.contains("3"));
        assert!(msg.contains("2"));
    }
}
