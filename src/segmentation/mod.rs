//! Physiological segment isolation
//!
//! Isolates the meaningful portion of a denoised breath trace: the
//! continuous rise into the exhalation peak and the onset of the decay
//! back toward baseline. Everything before the rise and after the decay
//! onset is baseline drift and carries no discriminative signal.
//!
//! The scan order is rise start (A) <- true peak -> decay onset (C), so
//! the returned segment always brackets the peak and is never empty.

pub mod bounds;
pub mod gradient;
pub mod peaks;

use crate::error::FeatureError;

/// Inclusive index bounds of the physiologically relevant segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Active point A: start of the continuous rise
    pub start: usize,
    /// True peak index
    pub peak: usize,
    /// Decay point C: onset of the sustained decline (inclusive)
    pub end: usize,
}

impl Segment {
    /// Number of samples in the segment
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A segment always contains at least the peak sample
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow the segment's samples out of the trace it was located in
    pub fn samples<'a>(&self, signal: &'a [f64]) -> &'a [f64] {
        &signal[self.start..=self.end]
    }
}

/// Locate the rise-peak-decay segment of a denoised trace
///
/// # Arguments
///
/// * `signal` - Denoised sensor trace
/// * `prominence_range` - (min, max) prominence band for true-peak detection
/// * `width_range` - (min, max) width band in samples
/// * `decay_duration` - Length of the sustained-decline window marking C
///
/// # Returns
///
/// A [`Segment`] with `start <= peak <= end` and `end < signal.len()`.
///
/// # Errors
///
/// Returns `FeatureError::InvalidInput` for an empty trace.
pub fn locate_segment(
    signal: &[f64],
    prominence_range: (f64, f64),
    width_range: (f64, f64),
    decay_duration: usize,
) -> Result<Segment, FeatureError> {
    if signal.is_empty() {
        return Err(FeatureError::InvalidInput(
            "Cannot locate a segment in an empty signal".to_string(),
        ));
    }

    let peak = peaks::find_true_peak(signal, prominence_range, width_range);

    let grad = gradient::gradient(signal);
    let (start, end) = if grad.is_empty() {
        // Single-sample trace: the peak is the whole segment
        (peak, peak)
    } else {
        (
            bounds::find_active_point(&grad, peak),
            bounds::find_decay_point(&grad, peak, decay_duration),
        )
    };

    log::debug!(
        "Segment located: A={}, peak={}, C={} ({} samples)",
        start,
        peak,
        end,
        end - start + 1
    );

    Ok(Segment { start, peak, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breath_like(len: usize, center: usize, half_width: usize, height: f64) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let d = (i as f64 - center as f64).abs();
                (height * (1.0 - d / half_width as f64)).max(0.0)
            })
            .collect()
    }

    fn assert_invariants(seg: &Segment, len: usize) {
        assert!(seg.start <= seg.peak);
        assert!(seg.peak <= seg.end);
        assert!(seg.end < len);
        assert!(seg.len() >= 1);
    }

    #[test]
    fn test_segment_brackets_peak() {
        let signal = breath_like(300, 150, 30, 1.0);
        let seg = locate_segment(&signal, (0.25, 1.5), (10.0, 60.0), 20).unwrap();
        assert_invariants(&seg, 300);
        assert_eq!(seg.peak, 150);
        assert!(seg.start < 150);
        assert!(seg.end > 150);
    }

    #[test]
    fn test_segment_on_constant_signal() {
        let signal = vec![1.0; 100];
        let seg = locate_segment(&signal, (0.25, 1.5), (10.0, 60.0), 20).unwrap();
        assert_invariants(&seg, 100);
        // Argmax fallback picks index 0; flat gradient means both scans default
        assert_eq!(seg.peak, 0);
        assert_eq!(seg.end, 0);
    }

    #[test]
    fn test_segment_on_monotonic_rise() {
        let signal: Vec<f64> = (0..100).map(|i| i as f64 * 0.01).collect();
        let seg = locate_segment(&signal, (0.25, 1.5), (10.0, 60.0), 20).unwrap();
        assert_invariants(&seg, 100);
        // Peak at the last sample, rise from the very start, no decay window
        assert_eq!(seg.peak, 99);
        assert_eq!(seg.start, 0);
        assert_eq!(seg.end, 99);
    }

    #[test]
    fn test_segment_single_sample() {
        let seg = locate_segment(&[4.2], (0.25, 1.5), (10.0, 60.0), 20).unwrap();
        assert_eq!(
            seg,
            Segment {
                start: 0,
                peak: 0,
                end: 0
            }
        );
        assert_eq!(seg.len(), 1);
    }

    #[test]
    fn test_segment_empty_signal_is_error() {
        assert!(matches!(
            locate_segment(&[], (0.25, 1.5), (10.0, 60.0), 20),
            Err(FeatureError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_segment_samples_view() {
        let signal = breath_like(300, 150, 30, 1.0);
        let seg = locate_segment(&signal, (0.25, 1.5), (10.0, 60.0), 20).unwrap();
        let view = seg.samples(&signal);
        assert_eq!(view.len(), seg.len());
        assert_eq!(view[seg.peak - seg.start], signal[seg.peak]);
    }
}
