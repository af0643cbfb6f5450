//! Constrained peak detection
//!
//! Finds local maxima subject to prominence and width bands, then picks
//! the "true peak" of a breath trace: the tallest maximum that rises far
//! enough above its surroundings (prominence band) and persists long
//! enough (width band) to be a physiological exhalation response rather
//! than a noise spike.
//!
//! Plateaus count as a single maximum at their midpoint. Prominence is
//! measured against the lowest contour line enclosing the peak; width is
//! measured at half-prominence height with linear interpolation at the
//! crossings.

/// A detected local maximum with its qualification metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Sample index of the maximum (plateau midpoint for flat tops)
    pub index: usize,
    /// Height above the lowest enclosing contour line
    pub prominence: f64,
    /// Width in samples at half-prominence height
    pub width: f64,
}

/// Find all local maxima of a signal within prominence and width bands
///
/// # Arguments
///
/// * `signal` - Signal to search
/// * `prominence_range` - (min, max) prominence band, inclusive
/// * `width_range` - (min, max) width band in samples, inclusive
///
/// # Returns
///
/// Qualifying peaks in ascending index order. Signals shorter than 3
/// samples have no interior maxima and yield an empty vector.
pub fn find_peaks(
    signal: &[f64],
    prominence_range: (f64, f64),
    width_range: (f64, f64),
) -> Vec<Peak> {
    let maxima = local_maxima(signal);
    log::debug!(
        "Peak search over {} samples: {} raw maxima",
        signal.len(),
        maxima.len()
    );

    let mut peaks = Vec::new();
    for index in maxima {
        let (prominence, left_base, right_base) = peak_prominence(signal, index);
        if prominence < prominence_range.0 || prominence > prominence_range.1 {
            continue;
        }

        let width = peak_width(signal, index, prominence, left_base, right_base);
        if width < width_range.0 || width > width_range.1 {
            continue;
        }

        peaks.push(Peak {
            index,
            prominence,
            width,
        });
    }

    log::debug!(
        "{} peaks within prominence {:?} and width {:?}",
        peaks.len(),
        prominence_range,
        width_range
    );

    peaks
}

/// Pick the true peak of a breath trace
///
/// The true peak is the constrained maximum with the greatest signal
/// value. When no maximum satisfies the bands the global argmax is used
/// as a fallback; short or monotonic traces always take this path.
pub fn find_true_peak(
    signal: &[f64],
    prominence_range: (f64, f64),
    width_range: (f64, f64),
) -> usize {
    let peaks = find_peaks(signal, prominence_range, width_range);

    // First of equal maxima wins, as with the argmax fallback
    let mut best: Option<usize> = None;
    for peak in &peaks {
        match best {
            Some(b) if signal[peak.index] <= signal[b] => {}
            _ => best = Some(peak.index),
        }
    }
    if let Some(index) = best {
        return index;
    }

    log::warn!("No peak within constraint bands, falling back to global maximum");
    argmax(signal)
}

/// Index of the first occurrence of the maximum value
fn argmax(signal: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in signal.iter().enumerate() {
        if value > signal[best] {
            best = i;
        }
    }
    best
}

/// Find interior local maxima, treating a flat plateau as one maximum
/// at its midpoint
fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let n = signal.len();
    if n < 3 {
        return Vec::new();
    }

    let mut maxima = Vec::new();
    let i_max = n - 1;
    let mut i = 1;
    while i < i_max {
        if signal[i - 1] < signal[i] {
            // Scan past any plateau of equal samples
            let mut i_ahead = i + 1;
            while i_ahead < i_max && signal[i_ahead] == signal[i] {
                i_ahead += 1;
            }
            if signal[i_ahead] < signal[i] {
                let left_edge = i;
                let right_edge = i_ahead - 1;
                maxima.push((left_edge + right_edge) / 2);
                i = i_ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Prominence of the maximum at `peak`, plus its left/right bases
///
/// Walks outward from the peak until a strictly higher sample or the
/// signal border; the lowest sample on each side is that side's base,
/// and the prominence is the peak height above the higher of the two
/// bases.
fn peak_prominence(signal: &[f64], peak: usize) -> (f64, usize, usize) {
    let n = signal.len();
    let peak_value = signal[peak];

    let mut left_min = peak_value;
    let mut left_base = peak;
    let mut i = peak;
    while i > 0 && signal[i] <= peak_value {
        i -= 1;
        if signal[i] < left_min {
            left_min = signal[i];
            left_base = i;
        }
    }

    let mut right_min = peak_value;
    let mut right_base = peak;
    let mut i = peak;
    while i < n - 1 && signal[i] <= peak_value {
        i += 1;
        if signal[i] < right_min {
            right_min = signal[i];
            right_base = i;
        }
    }

    (peak_value - left_min.max(right_min), left_base, right_base)
}

/// Width of the peak at half-prominence height
///
/// Intersection points with the evaluation height are interpolated
/// linearly between samples, so widths are fractional.
fn peak_width(
    signal: &[f64],
    peak: usize,
    prominence: f64,
    left_base: usize,
    right_base: usize,
) -> f64 {
    let height = signal[peak] - prominence * 0.5;

    let mut i = peak;
    while i > left_base && height < signal[i] {
        i -= 1;
    }
    let mut left_ip = i as f64;
    if signal[i] < height {
        left_ip += (height - signal[i]) / (signal[i + 1] - signal[i]);
    }

    let mut i = peak;
    while i < right_base && height < signal[i] {
        i += 1;
    }
    let mut right_ip = i as f64;
    if signal[i] < height {
        right_ip -= (height - signal[i]) / (signal[i - 1] - signal[i]);
    }

    right_ip - left_ip
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Symmetric triangular bump of the given half-width and height,
    /// centered in a zero baseline
    fn bump(len: usize, center: usize, half_width: usize, height: f64) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let d = (i as f64 - center as f64).abs();
                (height * (1.0 - d / half_width as f64)).max(0.0)
            })
            .collect()
    }

    #[test]
    fn test_find_peaks_qualifying_bump() {
        // Height 1.0 triangle with half-width 20: prominence 1.0,
        // width at half height = 20 samples
        let signal = bump(200, 100, 20, 1.0);
        let peaks = find_peaks(&signal, (0.25, 1.5), (10.0, 60.0));
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 100);
        assert!((peaks[0].prominence - 1.0).abs() < 1e-9);
        assert!((peaks[0].width - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_peaks_rejects_low_prominence() {
        let signal = bump(200, 100, 20, 0.1);
        let peaks = find_peaks(&signal, (0.25, 1.5), (10.0, 60.0));
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_find_peaks_rejects_narrow_spike() {
        // Half-width 2 -> width 2 at half height, below the 10-sample floor
        let signal = bump(200, 100, 2, 1.0);
        let peaks = find_peaks(&signal, (0.25, 1.5), (10.0, 60.0));
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_find_peaks_rejects_excessive_prominence() {
        let signal = bump(200, 100, 20, 3.0);
        let peaks = find_peaks(&signal, (0.25, 1.5), (10.0, 60.0));
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_find_peaks_plateau_midpoint() {
        let mut signal = vec![0.0; 60];
        for v in signal.iter_mut().skip(20).take(5) {
            *v = 1.0;
        }
        // Ramp shoulders so the plateau is a genuine maximum with width >= 10
        for i in 12..20 {
            signal[i] = (i - 12) as f64 / 8.0;
        }
        for i in 25..33 {
            signal[i] = (33 - i) as f64 / 8.0;
        }
        let maxima = local_maxima(&signal);
        assert_eq!(maxima, vec![22]);
    }

    #[test]
    fn test_true_peak_prefers_tallest_qualifying() {
        let mut signal = bump(300, 80, 20, 0.8);
        let second = bump(300, 220, 20, 1.2);
        for (a, b) in signal.iter_mut().zip(&second) {
            *a += *b;
        }
        let idx = find_true_peak(&signal, (0.25, 1.5), (10.0, 60.0));
        assert_eq!(idx, 220);
    }

    #[test]
    fn test_true_peak_global_max_fallback() {
        // Monotonic ramp: no interior maximum, argmax is the last sample
        let signal: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert_eq!(find_true_peak(&signal, (0.25, 1.5), (10.0, 60.0)), 49);
    }

    #[test]
    fn test_true_peak_constant_signal() {
        let signal = vec![2.5; 40];
        assert_eq!(find_true_peak(&signal, (0.25, 1.5), (10.0, 60.0)), 0);
    }

    #[test]
    fn test_true_peak_fallback_on_short_signal() {
        assert_eq!(find_true_peak(&[1.0, 3.0], (0.25, 1.5), (10.0, 60.0)), 1);
    }
}
