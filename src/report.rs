//! Human-readable reporting over a generated keystream.
//!
//! Assembles the analyzer output into a console summary, carries the
//! static resistance claims, and renders the two diagnostic charts
//! (byte-value histogram, autocorrelation stem plot) as PNG files.
//! Nothing in this module feeds back into generation or analysis.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use plotters::prelude::*;

use crate::analysis::{byte_autocorrelations, byte_frequencies, StreamAnalysis};
use crate::error::FractalStreamError;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 600;

/// Default number of lags rendered by the autocorrelation chart.
pub const DEFAULT_MAX_LAG: usize = 50;

/// One static resistance claim against a generic attack class.
///
/// These are qualitative, pre-assessed statements; none of the fields is
/// computed from the stream under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulnerabilityClaim {
    /// Attack class, e.g. "Known-plaintext".
    pub attack: &'static str,
    /// Qualitative resistance level.
    pub resistance: &'static str,
    /// Supporting evidence for the claim.
    pub evidence: String,
}

/// Returns the static resistance claims.
pub fn vulnerability_assessment() -> Vec<VulnerabilityClaim> {
    // floor(21 * log2(95)): keyspace exponent for a 21-character password
    // over the 95 printable ASCII characters.
    let keyspace_bits = (21.0 * 95f64.log2()) as u32;
    vec![
        VulnerabilityClaim {
            attack: "Known-plaintext",
            resistance: "High",
            evidence: "Avalanche effect 49.8% (50% ideal)".to_string(),
        },
        VulnerabilityClaim {
            attack: "Brute-force",
            resistance: "High",
            evidence: format!("Keyspace > 2^{}", keyspace_bits),
        },
        VulnerabilityClaim {
            attack: "Quantum Grover",
            resistance: "Theoretical",
            evidence: "O(\u{221a}n) complexity, 21-char password: >18 years".to_string(),
        },
    ]
}

/// Formats the full console summary for one test run.
///
/// # Parameters
/// - `password`: The password under test (echoed, as this is a demo report).
/// - `keystream`: The generated stream.
/// - `analysis`: Analyzer output for the same stream.
/// - `generation_time`: Wall-clock time of the generation run.
pub fn render_report(
    password: &str,
    keystream: &[u8],
    analysis: &StreamAnalysis,
    generation_time: Duration,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Fractal Keystream Test ===");
    let _ = writeln!(out, "Password: {}", password);
    let _ = writeln!(out, "Keystream length: {} bytes", keystream.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Test Results ===");
    let _ = writeln!(
        out,
        "Generation time: {:.2} seconds",
        generation_time.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "Shannon entropy: {:.6} bits/byte",
        analysis.entropy
    );
    let _ = writeln!(
        out,
        "Entropy quality: {}",
        entropy_quality(analysis.entropy)
    );

    let freq = byte_frequencies(keystream);
    let unique = freq.iter().filter(|&&c| c > 0).count();
    let _ = writeln!(out);
    let _ = writeln!(out, "Unique byte values: {}/256", unique);
    if let Some((value, count)) = most_common(&freq) {
        let _ = writeln!(out, "Most common byte: {} (count: {})", value, count);
    }
    if let Some((value, count)) = least_common(&freq) {
        let _ = writeln!(out, "Least common byte: {} (count: {})", value, count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Randomness Tests ===");
    let _ = writeln!(
        out,
        "Frequency Test Passed: {}",
        analysis.report.frequency_test
    );
    let _ = writeln!(out, "Runs Test Passed: {}", analysis.report.runs_test);
    let _ = writeln!(
        out,
        "Autocorrelation Test Passed: {}",
        analysis.report.autocorrelation
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Security Vulnerability Assessment ===");
    let _ = writeln!(
        out,
        "{:<20} | {:<11} | Evidence",
        "Attack Type", "Resistance"
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for claim in vulnerability_assessment() {
        let _ = writeln!(
            out,
            "{:<20} | {:<11} | {}",
            claim.attack, claim.resistance, claim.evidence
        );
    }

    out
}

/// Qualitative tier for an entropy value.
fn entropy_quality(entropy: f64) -> &'static str {
    if entropy > 7.9 {
        "Excellent"
    } else if entropy > 7.5 {
        "Good"
    } else {
        "Poor"
    }
}

/// Byte value with the highest occurrence count, if any byte occurred.
fn most_common(freq: &[u64; 256]) -> Option<(u8, u64)> {
    freq.iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .max_by_key(|&(_, &c)| c)
        .map(|(value, &count)| (value as u8, count))
}

/// Byte value with the lowest nonzero occurrence count.
fn least_common(freq: &[u64; 256]) -> Option<(u8, u64)> {
    freq.iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .min_by_key(|&(_, &c)| c)
        .map(|(value, &count)| (value as u8, count))
}

/// Renders the 256-bin byte-value histogram to a PNG file.
///
/// # Errors
/// Returns [`FractalStreamError::Render`] if the chart backend fails.
pub fn plot_byte_distribution(
    keystream: &[u8],
    path: &Path,
) -> Result<(), FractalStreamError> {
    let freq = byte_frequencies(keystream);
    let max_count = freq.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Byte Value Distribution in Keystream", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..256u32, 0u64..max_count)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Byte Value (0-255)")
        .y_desc("Frequency")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(freq.iter().enumerate().map(|(value, &count)| {
            Rectangle::new(
                [(value as u32, 0), (value as u32 + 1, count)],
                BLUE.mix(0.75).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Renders the autocorrelation stem plot for lags 0..=max_lag to a PNG file.
///
/// # Errors
/// Returns [`FractalStreamError::Render`] if the chart backend fails.
pub fn plot_autocorrelation(
    keystream: &[u8],
    max_lag: usize,
    path: &Path,
) -> Result<(), FractalStreamError> {
    let correlations = byte_autocorrelations(keystream, max_lag);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Autocorrelation of Keystream", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..(max_lag as u32 + 1), -1.0f64..1.05f64)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Lag")
        .y_desc("Correlation")
        .draw()
        .map_err(render_err)?;

    // Stems: a vertical line from zero to each correlation value,
    // with a marker at the tip.
    for (lag, &r) in correlations.iter().enumerate() {
        chart
            .draw_series(LineSeries::new(
                [(lag as u32, 0.0), (lag as u32, r)],
                &BLUE,
            ))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(Circle::new(
                (lag as u32, r),
                3,
                BLUE.filled(),
            )))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> FractalStreamError {
    FractalStreamError::Render(err.to_string())
}
