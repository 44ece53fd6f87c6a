use clap::{Parser, Subcommand, ValueEnum};
use codec_contract_bench::codec::{registry, Codec, FieldSchema};
use codec_contract_bench::dataset::{self, Dataset, FixtureConfig};
use codec_contract_bench::harness::{run_suite, BenchConfig, Profile};
use codec_contract_bench::report::{RunMeta, SuiteReport};
use codec_contract_bench::{analyze, artifacts, render, CodecKind};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Quick,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark the registered codecs and emit the comparative report.
    Bench {
        /// Which codec(s) to benchmark.
        #[arg(long, value_enum, default_value_t = CodecKind::All)]
        codec: CodecKind,

        /// Assumed request rate for the bandwidth projection.
        #[arg(long, default_value_t = 10_000)]
        rate: u64,

        /// Baseline codec for relative-gain percentages.
        #[arg(long, default_value = "json")]
        baseline: String,

        /// Benchmark a generated fixture of this many records instead of
        /// the canonical three.
        #[arg(long, value_name = "N")]
        count: Option<u64>,

        /// Field-rule schema resource for the protobuf codec; the
        /// embedded default is used if omitted.
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Also write one encoded artifact per surviving codec into this
        /// directory.
        #[arg(long, value_name = "DIR")]
        artifacts: Option<PathBuf>,
    },

    /// Write each codec's encoded artifact to disk without benchmarking.
    Export {
        #[arg(long, value_enum, default_value_t = CodecKind::All)]
        codec: CodecKind,

        #[arg(long, short = 'o', value_name = "DIR")]
        output: PathBuf,

        #[arg(long, value_name = "N")]
        count: Option<u64>,

        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },

    /// Show the fixture shape for the given parameters.
    FixtureInfo {
        #[arg(long, value_name = "N")]
        count: Option<u64>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "codec-contract-bench")]
#[command(about = "Deterministic comparative codec benchmark runner (JSON output)")]
struct Args {
    #[arg(long, value_enum, default_value_t = ProfileArg::Full, global = true)]
    profile: ProfileArg,

    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Explicit iteration count; overrides the profile default (1000 for
    /// full, 200 for quick).
    #[arg(long, global = true)]
    iterations: Option<u64>,

    /// Where to write the JSON report. If omitted, prints to stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

fn now_utc() -> String {
    // Avoid adding a chrono dependency; this is "good enough" for reports.
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Best-effort: read from environment set by CI/build scripts.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

fn load_schema(path: Option<&PathBuf>) -> io::Result<Arc<FieldSchema>> {
    // Schema failures are fatal before any benchmarking starts.
    let schema = match path {
        Some(p) => FieldSchema::load(p),
        None => FieldSchema::embedded(),
    }
    .map_err(io::Error::other)?;
    Ok(Arc::new(schema))
}

fn fixture_for(count: Option<u64>, seed: u64) -> Dataset {
    match count {
        Some(count) => dataset::generate(&FixtureConfig { count, seed }),
        None => dataset::canonical(),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let cfg = BenchConfig {
        profile: args.profile.into(),
        seed: args.seed,
        iterations: args.iterations,
    };

    match &args.cmd {
        Command::Bench {
            codec,
            rate,
            baseline,
            count,
            schema,
            artifacts: artifacts_dir,
        } => {
            let schema = load_schema(schema.as_ref())?;
            let codecs = registry(*codec, schema);
            let fixture = fixture_for(*count, cfg.seed);

            eprintln!(
                "Benchmarking {} codec(s) over {} record(s), {} iterations each...",
                codecs.len(),
                fixture.len(),
                cfg.iters()
            );

            let outcome = run_suite(&codecs, &fixture, &cfg);
            for exclusion in &outcome.exclusions {
                eprintln!("Codec `{}` excluded: {}", exclusion.codec, exclusion.reason);
            }

            let comparison =
                analyze::analyze(&outcome.results, &outcome.exclusions, baseline, *rate);
            eprint!("{}", render::render(&comparison));

            if let Some(dir) = artifacts_dir {
                let survivors: Vec<&dyn Codec> = codecs
                    .iter()
                    .map(|c| c.as_ref())
                    .filter(|c| outcome.results.iter().any(|r| r.codec == c.name()))
                    .collect();
                for artifact in artifacts::write_all(&survivors, &fixture, dir)? {
                    eprintln!(
                        "Wrote {} ({} bytes)",
                        artifact.path.display(),
                        artifact.bytes
                    );
                }
            }

            let report = SuiteReport {
                run: RunMeta {
                    schema_version: 1,
                    bench_version: env!("CARGO_PKG_VERSION").to_string(),
                    profile: cfg.profile.as_str().to_string(),
                    seed: cfg.seed,
                    iterations: cfg.iters(),
                    timestamp_utc: now_utc(),
                    git_sha: git_sha_short(),
                },
                comparison,
            };

            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            if let Some(out) = &args.out {
                fs::write(out, json)?;
            } else {
                println!("{json}");
            }
        }

        Command::Export {
            codec,
            output,
            count,
            schema,
        } => {
            let schema = load_schema(schema.as_ref())?;
            let codecs = registry(*codec, schema);
            let refs: Vec<&dyn Codec> = codecs.iter().map(|c| c.as_ref()).collect();
            let fixture = fixture_for(*count, cfg.seed);

            for artifact in artifacts::write_all(&refs, &fixture, output)? {
                eprintln!(
                    "Wrote {} ({} bytes)",
                    artifact.path.display(),
                    artifact.bytes
                );
            }
        }

        Command::FixtureInfo { count } => {
            let fixture = fixture_for(*count, cfg.seed);
            eprintln!("Fixture: {} record(s), seed {}", fixture.len(), cfg.seed);
            if let Some(first) = fixture.records().first() {
                eprintln!("  First: id={} name={} salary={}", first.id, first.name, first.salary);
            }
            if let Some(last) = fixture.records().last() {
                eprintln!("  Last:  id={} name={} salary={}", last.id, last.name, last.salary);
            }
        }
    }

    Ok(())
}
