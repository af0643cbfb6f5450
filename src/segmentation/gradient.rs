//! Discrete derivative of a sampled trace
//!
//! Second-order accurate central differences in the interior and
//! first-order one-sided differences at the boundaries, over unit
//! sample spacing.

/// Compute the discrete gradient of a signal
///
/// Returns a vector the same length as the input. Signals shorter than
/// two samples have no defined gradient and yield an empty vector.
pub fn gradient(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n < 2 {
        return Vec::new();
    }

    let mut out = vec![0.0; n];
    out[0] = signal[1] - signal[0];
    out[n - 1] = signal[n - 1] - signal[n - 2];
    for i in 1..n - 1 {
        out[i] = (signal[i + 1] - signal[i - 1]) / 2.0;
    }
    out
}
