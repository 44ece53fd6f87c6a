//! Text rendering of a finalized comparison report.
//!
//! Pure formatting: values are presented as finalized by the analyzer
//! and the runner, converted only between display units (ns to ms). A
//! report with zero codecs renders an empty table.

use std::fmt::Write;

use crate::analyze::{ComparisonReport, RelativeGain};
use crate::harness::BenchmarkResult;

fn ms(ns: f64) -> String {
    format!("{:.3}", ns / 1e6)
}

fn gain_line(gain: RelativeGain, better: &str, worse: &str) -> String {
    match gain {
        RelativeGain::Percent(p) if p >= 0.0 => format!("{:.1}% {}", p, better),
        RelativeGain::Percent(p) => format!("{:.1}% {}", -p, worse),
        RelativeGain::NotApplicable => "not applicable (zero baseline)".to_string(),
    }
}

fn find<'a>(results: &'a [BenchmarkResult], name: &str) -> Option<&'a BenchmarkResult> {
    results.iter().find(|r| r.codec == name)
}

pub fn render(report: &ComparisonReport<'_>) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "| {:<8} | {:>10} | {:>13} | {:>13} | {:>10} |",
        "Format", "Size (B)", "Encode (ms)", "Decode (ms)", "Total (ms)"
    )
    .unwrap();
    writeln!(
        out,
        "|{:-<10}|{:-<12}|{:-<15}|{:-<15}|{:-<12}|",
        "", "", "", "", ""
    )
    .unwrap();
    for r in report.results {
        writeln!(
            out,
            "| {:<8} | {:>10} | {:>13} | {:>13} | {:>10} |",
            r.codec,
            r.encoded_size,
            ms(r.encode_avg_ns),
            ms(r.decode_avg_ns),
            ms(r.total_avg_ns),
        )
        .unwrap();
    }

    if let (Some(enc), Some(dec), Some(size)) = (
        report.rankings.encode.first(),
        report.rankings.decode.first(),
        report.rankings.size.first(),
    ) {
        writeln!(out).unwrap();
        if let Some(r) = find(report.results, enc) {
            writeln!(out, "Fastest encode : {} ({} ms)", enc, ms(r.encode_avg_ns)).unwrap();
        }
        if let Some(r) = find(report.results, dec) {
            writeln!(out, "Fastest decode : {} ({} ms)", dec, ms(r.decode_avg_ns)).unwrap();
        }
        if let Some(r) = find(report.results, size) {
            writeln!(out, "Smallest size  : {} ({} B)", size, r.encoded_size).unwrap();
        }
    }

    match (report.baseline.codec, &report.baseline.note) {
        (Some(base), _) if !report.baseline.deltas.is_empty() => {
            writeln!(out).unwrap();
            writeln!(out, "Relative gains vs `{}`:", base).unwrap();
            for delta in &report.baseline.deltas {
                writeln!(out, "  {}:", delta.codec).unwrap();
                writeln!(
                    out,
                    "    encode : {}",
                    gain_line(delta.encode_gain, "faster", "slower")
                )
                .unwrap();
                writeln!(
                    out,
                    "    decode : {}",
                    gain_line(delta.decode_gain, "faster", "slower")
                )
                .unwrap();
                writeln!(
                    out,
                    "    size   : {}",
                    gain_line(delta.size_gain, "smaller", "larger")
                )
                .unwrap();
            }
        }
        (None, Some(note)) if !report.results.is_empty() => {
            writeln!(out).unwrap();
            writeln!(out, "Relative gains unavailable: {}", note).unwrap();
        }
        _ => {}
    }

    if !report.projection.per_codec.is_empty() {
        writeln!(out).unwrap();
        writeln!(
            out,
            "Projected bandwidth at {} req/s (derived, not measured):",
            report.projection.requests_per_second
        )
        .unwrap();
        for projection in &report.projection.per_codec {
            writeln!(out, "  {:<8} : {}", projection.codec, projection.human).unwrap();
        }
    }

    if !report.exclusions.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "Excluded codecs:").unwrap();
        for exclusion in report.exclusions {
            writeln!(out, "  {} : {}", exclusion.codec, exclusion.reason).unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::report::Exclusion;

    fn result(codec: &str, encode_avg_ns: f64, decode_avg_ns: f64, size: u64) -> BenchmarkResult {
        BenchmarkResult {
            codec: codec.to_string(),
            iters: 100,
            warmup_iters: 10,
            encode_total_ns: (encode_avg_ns * 100.0) as u128,
            decode_total_ns: (decode_avg_ns * 100.0) as u128,
            encode_avg_ns,
            decode_avg_ns,
            total_avg_ns: encode_avg_ns + decode_avg_ns,
            encoded_size: size,
            encoded_sha256: "0".repeat(64),
        }
    }

    #[test]
    fn zero_codecs_render_an_empty_table() {
        let report = analyze(&[], &[], "json", 10_000);
        let text = render(&report);
        assert!(text.contains("Format"));
        assert!(!text.contains("json "));
    }

    #[test]
    fn full_report_renders_every_section() {
        let results = vec![
            result("json", 2e6, 3e6, 100),
            result("xml", 4e6, 6e6, 180),
            result("proto", 1e6, 1.5e6, 40),
        ];
        let exclusions = vec![Exclusion {
            codec: "broken".to_string(),
            reason: "forced failure".to_string(),
        }];

        let report = analyze(&results, &exclusions, "json", 10_000);
        let text = render(&report);

        assert!(text.contains("Fastest encode : proto"));
        assert!(text.contains("Fastest decode : proto"));
        assert!(text.contains("Smallest size  : proto (40 B)"));
        assert!(text.contains("Relative gains vs `json`"));
        assert!(text.contains("60.0% smaller"));
        assert!(text.contains("80.0% larger"));
        assert!(text.contains("Projected bandwidth at 10000 req/s"));
        assert!(text.contains("Excluded codecs:"));
        assert!(text.contains("broken : forced failure"));
    }

    #[test]
    fn not_applicable_gain_is_spelled_out() {
        let results = vec![result("json", 0.0, 1.0, 0), result("proto", 1.0, 1.0, 40)];
        let report = analyze(&results, &[], "json", 1);
        let text = render(&report);
        assert!(text.contains("not applicable (zero baseline)"));
    }
}
