//! Spectral-energy features over the segment's power spectrum
//!
//! The power spectrum is the squared magnitude of the real-input DFT
//! coefficients (non-negative frequency half). ENERGY is its mean,
//! POWER its sum.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute [ENERGY, POWER] for a segment
///
/// Zero-fills for segments of length <= 1, where the transform is
/// meaningless.
pub fn spectral_features(segment: &[f64]) -> [f64; 2] {
    let n = segment.len();
    if n <= 1 {
        return [0.0; 2];
    }

    let mut spectrum: Vec<Complex<f64>> =
        segment.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut spectrum);

    // Power spectrum over the non-negative frequency half
    let n_half = n / 2 + 1;
    let power_spectrum: Vec<f64> = spectrum[..n_half].iter().map(|c| c.norm_sqr()).collect();

    let power: f64 = power_spectrum.iter().sum();
    let energy = power / n_half as f64;

    [energy, power]
}
