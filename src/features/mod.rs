//! Per-segment feature extraction
//!
//! Computes the fixed 7-feature block for one segment:
//! - Magnitude features: AVG, PTP, RMS
//! - Integral features: INT, SQ_INT
//! - Spectral features: ENERGY, POWER
//!
//! The order is significant. It determines column identity in the
//! feature row, and the downstream models were trained on exactly this
//! order.

pub mod integral;
pub mod magnitude;
pub mod spectral;

use serde::{Deserialize, Serialize};

/// Feature names in column order, suffixed onto the channel name
pub const FEATURE_NAMES: [&str; 7] = ["AVG", "PTP", "RMS", "INT", "SQ_INT", "ENERGY", "POWER"];

/// The 7 scalar features of one sensor channel's segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureBlock {
    /// Mean amplitude
    pub avg: f64,
    /// Peak-to-peak amplitude
    pub ptp: f64,
    /// Root mean square
    pub rms: f64,
    /// Count-normalized trapezoidal integral
    pub integral: f64,
    /// Count-normalized trapezoidal integral of the squared segment
    pub squared_integral: f64,
    /// Mean of the power spectrum
    pub energy: f64,
    /// Sum of the power spectrum
    pub power: f64,
}

impl FeatureBlock {
    /// Feature values in column order, matching [`FEATURE_NAMES`]
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.avg,
            self.ptp,
            self.rms,
            self.integral,
            self.squared_integral,
            self.energy,
            self.power,
        ]
    }
}

/// Extract the 7-feature block from a signal segment
///
/// Pure and deterministic: identical segments yield bit-identical
/// blocks. Segments of length <= 1 yield an all-zero block (every
/// feature group zero-fills independently).
pub fn extract(segment: &[f64]) -> FeatureBlock {
    let [avg, ptp, rms] = magnitude::magnitude_features(segment);
    let [integral, squared_integral] = integral::integral_features(segment);
    let [energy, power] = spectral::spectral_features(segment);

    FeatureBlock {
        avg,
        ptp,
        rms,
        integral,
        squared_integral,
        energy,
        power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_fixed_order() {
        let block = extract(&[1.0, 2.0, 3.0, 2.0, 1.0]);
        let values = block.to_array();
        assert_eq!(values.len(), FEATURE_NAMES.len());
        assert_eq!(values[0], block.avg);
        assert_eq!(values[1], block.ptp);
        assert_eq!(values[2], block.rms);
        assert_eq!(values[3], block.integral);
        assert_eq!(values[4], block.squared_integral);
        assert_eq!(values[5], block.energy);
        assert_eq!(values[6], block.power);
    }

    #[test]
    fn test_extract_degenerate_segment_all_zero() {
        assert_eq!(extract(&[42.0]).to_array(), [0.0; 7]);
        assert_eq!(extract(&[]).to_array(), [0.0; 7]);
    }

    #[test]
    fn test_extract_deterministic() {
        let segment: Vec<f64> = (0..50).map(|i| (i as f64 * 0.17).sin() + 1.0).collect();
        let a = extract(&segment);
        let b = extract(&segment);
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn test_extract_flat_segment_values() {
        let n = 10usize;
        let c = 3.0;
        let block = extract(&vec![c; n]);
        assert_eq!(block.avg, c);
        assert_eq!(block.ptp, 0.0);
        assert!((block.rms - c).abs() < 1e-12);
        assert!((block.integral - c * 9.0 / 10.0).abs() < 1e-12);
        assert!((block.squared_integral - c * c * 9.0 / 10.0).abs() < 1e-12);
        let dc = (n as f64 * c).powi(2);
        assert!((block.power - dc).abs() < 1e-6);
        assert!((block.energy - dc / 6.0).abs() < 1e-6);
    }
}
