//! Curve normalisation for polar rendering.

/// Degenerate-series tolerance, matching the comparison epsilon used
/// elsewhere in the numeric code.
const SPAN_EPSILON: f64 = 1e-10;

/// Min-max scale a series to [0, 1] and append a copy of the first scaled
/// value, closing the loop for radar plotting. Each series is scaled
/// against its own min/max.
///
/// A constant series has no usable span; it maps to a flat curve at 0.5
/// rather than dividing by zero, so the result always serialises cleanly.
pub fn normalise_closed(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut scaled: Vec<f64> = if span.abs() < SPAN_EPSILON {
        vec![0.5; series.len()]
    } else {
        series.iter().map(|&v| (v - min) / span).collect()
    };
    scaled.push(scaled[0]);
    scaled
}

// ── Tests ─────────────────────────────────────────────────────────────────────
