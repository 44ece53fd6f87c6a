//! Benchmark runner: repeated encode/decode cycles under one uniform
//! protocol.
//!
//! Single-call timings are dominated by clock resolution and cache
//! effects; the operations here are deterministic and side-effect-free,
//! so averaging many sequential repetitions of the same fixed input is
//! enough to stabilize them without outlier rejection. Iterations run
//! strictly sequentially within a codec, and codecs run one after
//! another, so measured durations never contend for CPU.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::Codec;
use crate::dataset::Dataset;
use crate::error::{BenchmarkError, CodecFailure, DecodeError, EncodeError};
use crate::report::Exclusion;
use crate::verify;

#[derive(Clone, Copy, Debug)]
pub enum Profile {
    Quick,
    Full,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub profile: Profile,
    pub seed: u64,
    /// Explicit iteration override; falls back to the profile default.
    pub iterations: Option<u64>,
}

impl BenchConfig {
    pub fn warmup_iters(&self) -> u64 {
        match self.profile {
            Profile::Quick => 16,
            Profile::Full => 50,
        }
    }

    pub fn iters(&self) -> u64 {
        self.iterations.unwrap_or(match self.profile {
            Profile::Quick => 200,
            Profile::Full => 1_000,
        })
    }
}

/// Accumulated encode/decode durations over one codec's timed loop.
#[derive(Clone, Debug)]
pub struct RoundTrip {
    pub iters: u64,
    pub warmup_iters: u64,
    pub encode_total_ns: u128,
    pub decode_total_ns: u128,
}

impl RoundTrip {
    pub fn encode_avg_ns(&self) -> f64 {
        (self.encode_total_ns as f64) / (self.iters.max(1) as f64)
    }

    pub fn decode_avg_ns(&self) -> f64 {
        (self.decode_total_ns as f64) / (self.iters.max(1) as f64)
    }
}

/// Measure `iters` sequential encode/decode cycles, timing each call in
/// isolation and summing the two directions separately.
///
/// Each iteration decodes the bytes it just encoded. Warm-up cycles run
/// first and are not recorded.
pub fn measure_round_trip<E, D>(
    iters: u64,
    warmup_iters: u64,
    mut encode: E,
    mut decode: D,
) -> Result<RoundTrip, CodecFailure>
where
    E: FnMut() -> Result<Vec<u8>, EncodeError>,
    D: FnMut(&[u8]) -> Result<Dataset, DecodeError>,
{
    for _ in 0..warmup_iters {
        let bytes = encode()?;
        black_box(decode(&bytes)?);
    }

    let mut encode_total_ns: u128 = 0;
    let mut decode_total_ns: u128 = 0;

    for _ in 0..iters {
        let start = Instant::now();
        let bytes = black_box(encode()?);
        encode_total_ns += start.elapsed().as_nanos();

        let start = Instant::now();
        black_box(decode(&bytes)?);
        decode_total_ns += start.elapsed().as_nanos();
    }

    Ok(RoundTrip {
        iters,
        warmup_iters,
        encode_total_ns,
        decode_total_ns,
    })
}

/// Per-codec aggregate. Never mutated after finalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub codec: String,

    pub iters: u64,
    pub warmup_iters: u64,

    pub encode_total_ns: u128,
    pub decode_total_ns: u128,
    pub encode_avg_ns: f64,
    pub decode_avg_ns: f64,
    pub total_avg_ns: f64,

    /// Measured once on the representative encoding; size is invariant
    /// across iterations for a fixed dataset and deterministic codec.
    pub encoded_size: u64,
    /// SHA-256 of the representative encoding, as a determinism witness.
    pub encoded_sha256: String,
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest: [u8; 32] = Sha256::digest(bytes).into();
    let mut s = String::with_capacity(64);
    for b in digest {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Benchmark one codec over the dataset.
///
/// Untimed setup: the schema verify gate, one representative round trip
/// (yielding the encoded size, its digest, and the decoded dataset for
/// the correctness check), then the warm-up cycles. Only the encode and
/// decode calls inside the loop are timed.
pub fn run(
    codec: &dyn Codec,
    dataset: &Dataset,
    cfg: &BenchConfig,
) -> Result<BenchmarkResult, BenchmarkError> {
    run_inner(codec, dataset, cfg).map_err(|cause| BenchmarkError {
        codec: codec.name().to_string(),
        cause,
    })
}

fn run_inner(
    codec: &dyn Codec,
    dataset: &Dataset,
    cfg: &BenchConfig,
) -> Result<BenchmarkResult, CodecFailure> {
    codec.verify(dataset)?;

    let representative = codec.encode(dataset)?;
    let decoded = codec.decode(&representative)?;
    verify::check(dataset, &decoded)?;

    let rt = measure_round_trip(
        cfg.iters(),
        cfg.warmup_iters(),
        || codec.encode(dataset),
        |bytes| codec.decode(bytes),
    )?;

    let encode_avg_ns = rt.encode_avg_ns();
    let decode_avg_ns = rt.decode_avg_ns();

    Ok(BenchmarkResult {
        codec: codec.name().to_string(),
        iters: rt.iters,
        warmup_iters: rt.warmup_iters,
        encode_total_ns: rt.encode_total_ns,
        decode_total_ns: rt.decode_total_ns,
        encode_avg_ns,
        decode_avg_ns,
        total_avg_ns: encode_avg_ns + decode_avg_ns,
        encoded_size: representative.len() as u64,
        encoded_sha256: hex_digest(&representative),
    })
}

/// Results plus exclusions for one full suite pass.
#[derive(Debug)]
pub struct SuiteOutcome {
    pub results: Vec<BenchmarkResult>,
    pub exclusions: Vec<Exclusion>,
}

/// Benchmark every registered codec, isolating failures.
///
/// A failing codec becomes an exclusion with its reason; the remaining
/// codecs' benchmarks proceed unaffected and keep registration order.
pub fn run_suite(codecs: &[Box<dyn Codec>], dataset: &Dataset, cfg: &BenchConfig) -> SuiteOutcome {
    let mut results = Vec::new();
    let mut exclusions = Vec::new();

    for codec in codecs {
        match run(codec.as_ref(), dataset, cfg) {
            Ok(result) => results.push(result),
            Err(err) => exclusions.push(Exclusion {
                codec: err.codec,
                reason: err.cause.to_string(),
            }),
        }
    }

    SuiteOutcome {
        results,
        exclusions,
    }
}
