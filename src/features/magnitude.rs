//! Magnitude features: mean amplitude, peak-to-peak amplitude, RMS

/// Compute [AVG, PTP, RMS] for a segment
///
/// Segments of a single sample (or none) zero-fill: a degenerate segment
/// carries no amplitude information, and the trained models expect zeros
/// there rather than an error.
pub fn magnitude_features(segment: &[f64]) -> [f64; 3] {
    if segment.len() <= 1 {
        return [0.0; 3];
    }

    let n = segment.len() as f64;
    let mean = segment.iter().sum::<f64>() / n;

    let max = segment.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = segment.iter().copied().fold(f64::INFINITY, f64::min);

    let rms = (segment.iter().map(|x| x * x).sum::<f64>() / n).sqrt();

    [mean, max - min, rms]
}
