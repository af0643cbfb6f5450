//! Integral features: count-normalized trapezoidal area of the segment
//! and of its square
//!
//! Normalizing by the sample count (not the span) keeps the two integral
//! columns on the scale the downstream models were fit with.

/// Trapezoidal integral over unit sample spacing
fn trapezoid(samples: &[f64]) -> f64 {
    samples
        .windows(2)
        .map(|w| (w[0] + w[1]) / 2.0)
        .sum()
}

/// Compute [INT, SQ_INT] for a segment
///
/// Zero-fills for segments of length <= 1, where the trapezoidal rule
/// has no interval to integrate over.
pub fn integral_features(segment: &[f64]) -> [f64; 2] {
    if segment.len() <= 1 {
        return [0.0; 2];
    }

    let n = segment.len() as f64;
    let integral = trapezoid(segment) / n;

    let squared: Vec<f64> = segment.iter().map(|x| x * x).collect();
    let squared_integral = trapezoid(&squared) / n;

    [integral, squared_integral]
}
