//! # Breath DSP
//!
//! A signal-analysis engine for breath-based diabetes screening,
//! turning multi-sensor VOC traces into the fixed-schema feature row
//! consumed by pre-trained risk and BGL models.
//!
//! ## Features
//!
//! - **Spectral denoising**: mean-magnitude threshold filter over the
//!   real-input DFT of each sensor trace
//! - **Segment isolation**: prominence/width-constrained true-peak
//!   detection with derivative-based rise and decay boundaries
//! - **Feature extraction**: 7 magnitude, integral, and spectral-energy
//!   features per channel, in a fixed model-facing column order
//! - **Prediction seam**: trait boundary for the external classifier
//!   and regressor artifacts
//!
//! ## Quick Start
//!
//! ```
//! use breath_dsp::{ChannelTable, FeatureMatrixBuilder, PipelineConfig, Vitals};
//!
//! let config = PipelineConfig {
//!     channels: vec!["MQ2".to_string()],
//!     ..PipelineConfig::default()
//! };
//!
//! let mut table = ChannelTable::new();
//! let trace: Vec<f64> = (0..300)
//!     .map(|i| (1.0 - (i as f64 - 150.0).abs() / 30.0).max(0.0))
//!     .collect();
//! table.insert("MQ2", trace);
//!
//! let vitals = Vitals { age: 45, gender: 1, heart_beat: 72, spo2: 97, max_bp: 120, min_bp: 80 };
//!
//! let row = FeatureMatrixBuilder::new(config).build(&vitals, &table)?;
//! assert_eq!(row.len(), 6 + 7);
//! # Ok::<(), breath_dsp::FeatureError>(())
//! ```
//!
//! ## Architecture
//!
//! The per-channel pipeline follows this flow:
//!
//! ```text
//! Raw trace -> Denoise -> Segment location -> Feature block
//! ```
//!
//! [`FeatureMatrixBuilder`] runs it for every configured channel and
//! concatenates the blocks behind the vitals fields. Column order is a
//! contract with the trained models and never varies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod pipeline;
pub mod preprocessing;
pub mod segmentation;

// Re-export main types
pub use config::{PipelineConfig, REFERENCE_CHANNELS};
pub use error::FeatureError;
pub use features::{FeatureBlock, FEATURE_NAMES};
pub use inference::{diagnose, BglRegressor, Diagnosis, RiskClassifier, RiskLabel};
pub use pipeline::{
    ChannelFeaturePipeline, ChannelTable, FeatureMatrixBuilder, FeatureRow, Vitals, VITALS_FIELDS,
};
pub use segmentation::{locate_segment, Segment};

/// Build the feature row for one breath sample
///
/// Convenience wrapper around [`FeatureMatrixBuilder`] for callers that
/// do not keep a builder around.
///
/// # Arguments
///
/// * `vitals` - Externally measured body vitals
/// * `table` - Sensor traces keyed by channel name, equal lengths
/// * `config` - Pipeline configuration (channel list, bands, rates)
///
/// # Errors
///
/// Returns [`FeatureError`] on any schema or signal problem; no partial
/// row is ever produced.
pub fn build_feature_row(
    vitals: &Vitals,
    table: &ChannelTable,
    config: PipelineConfig,
) -> Result<FeatureRow, FeatureError> {
    FeatureMatrixBuilder::new(config).build(vitals, table)
}
