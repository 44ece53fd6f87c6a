use clap::ValueEnum;

pub mod analyze;
pub mod artifacts;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod render;
pub mod report;
pub mod verify;

/// Serialization codec variant to benchmark.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum CodecKind {
    /// Benchmark every registered codec.
    #[default]
    All,
    /// Self-describing JSON text codec only.
    Json,
    /// Tagged XML markup codec only.
    Xml,
    /// Schema-validated Protobuf binary codec only.
    Proto,
}
