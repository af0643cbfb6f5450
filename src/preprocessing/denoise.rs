//! Spectral denoising via mean-magnitude thresholding
//!
//! Removes frequency-domain noise from one raw sensor channel.
//!
//! Algorithm:
//! 1. Compute the real-input DFT of the trace (non-negative frequency half)
//! 2. Compute the mean coefficient magnitude as a threshold
//! 3. Zero every coefficient whose magnitude does not exceed the threshold
//!    (strict: a coefficient exactly at the mean is dropped)
//! 4. Inverse-transform back to a time-domain trace of the original length
//!
//! The filter is idempotent once converged: a second pass over an already
//! filtered trace removes no further energy when the surviving
//! coefficients all sit above the new mean.
//!
//! # Example
//!
//! ```
//! use breath_dsp::preprocessing::denoise::denoise;
//!
//! let trace: Vec<f64> = (0..200)
//!     .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 100.0).sin())
//!     .collect();
//! let smoothed = denoise(&trace, 100.0)?;
//! assert_eq!(smoothed.len(), trace.len());
//! # Ok::<(), breath_dsp::FeatureError>(())
//! ```

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::FeatureError;

/// Denoise a raw sensor trace with a mean-magnitude spectral filter
///
/// # Arguments
///
/// * `signal` - Raw sensor samples (voltage trace)
/// * `sampling_rate` - Sampling rate in Hz (100 Hz for the reference rig)
///
/// # Returns
///
/// Filtered time-domain trace of the same length as the input
///
/// # Errors
///
/// Returns `FeatureError::InvalidInput` if the trace has length <= 1
/// (the transform is meaningless) or contains non-finite samples.
pub fn denoise(signal: &[f64], sampling_rate: f64) -> Result<Vec<f64>, FeatureError> {
    let n = signal.len();

    if n <= 1 {
        return Err(FeatureError::InvalidInput(format!(
            "Signal of length {} is too short to denoise",
            n
        )));
    }

    if let Some(pos) = signal.iter().position(|x| !x.is_finite()) {
        return Err(FeatureError::InvalidInput(format!(
            "Non-finite sample at index {}",
            pos
        )));
    }

    log::debug!(
        "Denoising trace: {} samples at {} Hz",
        n,
        sampling_rate
    );

    // Forward FFT over the full complex spectrum
    let mut spectrum: Vec<Complex<f64>> =
        signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut spectrum);

    // Threshold over the non-negative frequency half only (bins 0..=n/2),
    // matching real-input transform semantics. The mirrored half carries
    // the same magnitudes and would bias the mean toward interior bins.
    let n_half = n / 2 + 1;
    let threshold = spectrum[..n_half]
        .iter()
        .map(|c| c.norm())
        .sum::<f64>()
        / n_half as f64;

    // Keep a bin only if its magnitude strictly exceeds the mean. Each
    // dropped bin in the half spectrum takes its conjugate mirror with it
    // so the reconstruction stays real-valued.
    let mut kept = 0usize;
    for k in 0..n_half {
        if spectrum[k].norm() > threshold {
            kept += 1;
        } else {
            spectrum[k] = Complex::new(0.0, 0.0);
            if k > 0 && k < n - k {
                spectrum[n - k] = Complex::new(0.0, 0.0);
            }
        }
    }

    log::debug!(
        "Spectral filter kept {}/{} bins (threshold={:.6})",
        kept,
        n_half,
        threshold
    );

    // Inverse FFT and 1/N normalization
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut spectrum);

    let scale = 1.0 / n as f64;
    Ok(spectrum.iter().map(|c| c.re * scale).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_denoise_preserves_length() {
        let trace = sine(2.0, 100.0, 200);
        let filtered = denoise(&trace, 100.0).unwrap();
        assert_eq!(filtered.len(), 200);
    }

    #[test]
    fn test_denoise_odd_length() {
        let trace = sine(3.0, 100.0, 201);
        let filtered = denoise(&trace, 100.0).unwrap();
        assert_eq!(filtered.len(), 201);
        assert!(filtered.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_denoise_retains_dominant_component() {
        // 2 Hz tone plus weak broadband ripple. The tone's bin magnitude
        // dwarfs the mean, so the tone must survive the filter.
        let rate = 100.0;
        let trace: Vec<f64> = (0..200)
            .map(|i| {
                let t = i as f64 / rate;
                (2.0 * std::f64::consts::PI * 2.0 * t).sin()
                    + 0.01 * (2.0 * std::f64::consts::PI * 37.0 * t).sin()
                    + 0.01 * (2.0 * std::f64::consts::PI * 11.0 * t).sin()
            })
            .collect();

        let filtered = denoise(&trace, rate).unwrap();

        let energy = |s: &[f64]| s.iter().map(|x| x * x).sum::<f64>();
        let tone = sine(2.0, rate, 200);
        // Filtered trace keeps nearly all of the tone's energy
        assert!(energy(&filtered) > 0.9 * energy(&tone));
        // and stays close to the clean tone sample-by-sample
        let max_dev = filtered
            .iter()
            .zip(&tone)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        assert!(max_dev < 0.05, "max deviation {} too large", max_dev);
    }

    #[test]
    fn test_denoise_converged_signal_is_fixed_point() {
        let trace = sine(2.0, 100.0, 200);
        let once = denoise(&trace, 100.0).unwrap();
        let twice = denoise(&once, 100.0).unwrap();
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_denoise_rejects_short_signal() {
        assert!(matches!(
            denoise(&[1.0], 100.0),
            Err(FeatureError::InvalidInput(_))
        ));
        assert!(matches!(
            denoise(&[], 100.0),
            Err(FeatureError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_denoise_rejects_non_finite() {
        let trace = vec![0.0, 1.0, f64::NAN, 2.0];
        assert!(matches!(
            denoise(&trace, 100.0),
            Err(FeatureError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_denoise_output_is_real_for_random_like_input() {
        let trace: Vec<f64> = (0..128)
            .map(|i| ((i * 37 + 11) % 17) as f64 / 17.0 - 0.5)
            .collect();
        let filtered = denoise(&trace, 100.0).unwrap();
        assert_eq!(filtered.len(), 128);
        assert!(filtered.iter().all(|x| x.is_finite()));
    }
}
