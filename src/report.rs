//! Serde surface of a run: metadata, exclusions, and the full suite
//! report written as pretty JSON to stdout or `--out`.

use serde::{Deserialize, Serialize};

use crate::analyze::ComparisonReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub profile: String,
    pub seed: u64,
    pub iterations: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

/// A codec excluded from the comparison, with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub codec: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport<'a> {
    pub run: RunMeta,
    #[serde(flatten)]
    pub comparison: ComparisonReport<'a>,
}
