//! Comparative analysis of finalized benchmark results.
//!
//! Ranks codecs along three independent axes, computes relative gains
//! against a designated baseline, and projects bandwidth at an assumed
//! request rate. Everything numeric is finalized here; the renderer only
//! presents.

use serde::Serialize;

use crate::harness::BenchmarkResult;
use crate::report::Exclusion;

/// Relative gain of a candidate against the baseline, in percent.
/// Positive means the candidate is smaller/faster than the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum RelativeGain {
    Percent(f64),
    /// The baseline value for this metric was zero; the ratio is
    /// undefined and must not degenerate to infinity or NaN.
    NotApplicable,
}

fn relative_gain(baseline: f64, candidate: f64) -> RelativeGain {
    if baseline == 0.0 {
        RelativeGain::NotApplicable
    } else {
        RelativeGain::Percent((baseline - candidate) / baseline * 100.0)
    }
}

/// Codec names ordered best-first along each axis. Ties keep
/// registration order (the results slice is in registration order and
/// the sort is stable).
#[derive(Clone, Debug, Serialize)]
pub struct Rankings<'a> {
    pub encode: Vec<&'a str>,
    pub decode: Vec<&'a str>,
    pub size: Vec<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BaselineDelta<'a> {
    pub codec: &'a str,
    pub encode_gain: RelativeGain,
    pub decode_gain: RelativeGain,
    pub size_gain: RelativeGain,
}

#[derive(Clone, Debug, Serialize)]
pub struct BaselineSection<'a> {
    /// The baseline codec, when it survived the run.
    pub codec: Option<&'a str>,
    /// Why the delta section is empty, when it is.
    pub note: Option<String>,
    pub deltas: Vec<BaselineDelta<'a>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BandwidthProjection<'a> {
    pub codec: &'a str,
    pub bytes_per_second: u128,
    pub human: String,
}

/// Derived, informational projection at an assumed request rate — not a
/// measured quantity.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectionSection<'a> {
    pub requests_per_second: u64,
    pub per_codec: Vec<BandwidthProjection<'a>>,
}

/// Read-only view ranking all surviving results. Holds references to the
/// results it ranks; the codec set is exactly the surviving set of the
/// run.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub results: &'a [BenchmarkResult],
    pub exclusions: &'a [Exclusion],
    pub rankings: Rankings<'a>,
    pub baseline: BaselineSection<'a>,
    pub projection: ProjectionSection<'a>,
}

fn ranked_names<'a, K>(results: &'a [BenchmarkResult], key: K) -> Vec<&'a str>
where
    K: Fn(&BenchmarkResult) -> f64,
{
    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by(|&a, &b| key(&results[a]).total_cmp(&key(&results[b])));
    order.into_iter().map(|i| results[i].codec.as_str()).collect()
}

pub fn format_bytes_per_s(bytes: u128) -> String {
    const UNITS: &[&str] = &["B/s", "KiB/s", "MiB/s", "GiB/s", "TiB/s"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

pub fn analyze<'a>(
    results: &'a [BenchmarkResult],
    exclusions: &'a [Exclusion],
    baseline: &str,
    requests_per_second: u64,
) -> ComparisonReport<'a> {
    let rankings = Rankings {
        encode: ranked_names(results, |r| r.encode_avg_ns),
        decode: ranked_names(results, |r| r.decode_avg_ns),
        size: ranked_names(results, |r| r.encoded_size as f64),
    };

    let baseline_result = results.iter().find(|r| r.codec == baseline);
    let baseline_section = match baseline_result {
        Some(base) => BaselineSection {
            codec: Some(base.codec.as_str()),
            note: None,
            deltas: results
                .iter()
                .filter(|r| r.codec != base.codec)
                .map(|r| BaselineDelta {
                    codec: r.codec.as_str(),
                    encode_gain: relative_gain(base.encode_avg_ns, r.encode_avg_ns),
                    decode_gain: relative_gain(base.decode_avg_ns, r.decode_avg_ns),
                    size_gain: relative_gain(base.encoded_size as f64, r.encoded_size as f64),
                })
                .collect(),
        },
        None => BaselineSection {
            codec: None,
            note: Some(format!(
                "baseline codec `{}` has no surviving result",
                baseline
            )),
            deltas: Vec::new(),
        },
    };

    let projection = ProjectionSection {
        requests_per_second,
        per_codec: results
            .iter()
            .map(|r| {
                let bytes_per_second = r.encoded_size as u128 * requests_per_second as u128;
                BandwidthProjection {
                    codec: r.codec.as_str(),
                    bytes_per_second,
                    human: format_bytes_per_s(bytes_per_second),
                }
            })
            .collect(),
    };

    ComparisonReport {
        results,
        exclusions,
        rankings,
        baseline: baseline_section,
        projection,
    }
}
