//! Pipeline orchestration and feature-row assembly
//!
//! [`ChannelFeaturePipeline`] runs one sensor channel through
//! denoise -> segment -> extract. [`FeatureMatrixBuilder`] runs every
//! configured channel and concatenates the resulting blocks with the
//! vitals fields into the final [`FeatureRow`].
//!
//! The row's column set and order are a contract with the pre-trained
//! models; construction is fail-fast and never yields a partial row.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::FeatureError;
use crate::features::{self, FeatureBlock, FEATURE_NAMES};
use crate::preprocessing::denoise::denoise;
use crate::segmentation::locate_segment;

/// Vitals field names in column order
pub const VITALS_FIELDS: [&str; 6] = ["Age", "Gender", "Heart_Beat", "SPO2", "max_BP", "min_BP"];

/// Externally measured body vitals accompanying one breath sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Age in years
    pub age: u32,
    /// Gender code: 0 = male, 1 = female
    pub gender: u8,
    /// Heart rate in beats per minute
    pub heart_beat: u32,
    /// Blood oxygen saturation, 0-100
    pub spo2: u32,
    /// Systolic blood pressure
    pub max_bp: u32,
    /// Diastolic blood pressure
    pub min_bp: u32,
}

impl Vitals {
    /// Field values in column order, matching [`VITALS_FIELDS`]
    pub fn to_values(&self) -> [f64; 6] {
        [
            self.age as f64,
            self.gender as f64,
            self.heart_beat as f64,
            self.spo2 as f64,
            self.max_bp as f64,
            self.min_bp as f64,
        ]
    }

    fn validate(&self) -> Result<(), FeatureError> {
        if self.gender > 1 {
            return Err(FeatureError::InvalidInput(format!(
                "Gender code must be 0 or 1, got {}",
                self.gender
            )));
        }
        if self.spo2 > 100 {
            return Err(FeatureError::InvalidInput(format!(
                "SPO2 must be in 0-100, got {}",
                self.spo2
            )));
        }
        Ok(())
    }
}

/// One breath sample's sensor traces, keyed by channel name
///
/// Preserves insertion order, though the feature row is always
/// assembled in configured channel order, not table order.
#[derive(Debug, Clone, Default)]
pub struct ChannelTable {
    entries: Vec<(String, Vec<f64>)>,
}

impl ChannelTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel's samples, replacing any channel of the same name
    pub fn insert(&mut self, name: impl Into<String>, samples: Vec<f64>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = samples;
        } else {
            self.entries.push((name, samples));
        }
    }

    /// Samples for a channel, if present
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.as_slice())
    }

    /// Channel names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of channels in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no channels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-channel feature pipeline: denoise -> locate segment -> extract
#[derive(Debug, Clone)]
pub struct ChannelFeaturePipeline {
    sampling_rate: f64,
    prominence_range: (f64, f64),
    width_range: (f64, f64),
    decay_duration: usize,
}

impl ChannelFeaturePipeline {
    /// Build a pipeline from the configured segmentation parameters
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            sampling_rate: config.sampling_rate,
            prominence_range: config.prominence_range,
            width_range: config.width_range,
            decay_duration: config.decay_duration,
        }
    }

    /// Run one raw sensor trace through the full per-channel pipeline
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInput` for traces of length <= 1 or
    /// with non-finite samples (propagated from denoising).
    pub fn process_channel(&self, raw: &[f64]) -> Result<FeatureBlock, FeatureError> {
        let denoised = denoise(raw, self.sampling_rate)?;
        let segment = locate_segment(
            &denoised,
            self.prominence_range,
            self.width_range,
            self.decay_duration,
        )?;
        Ok(features::extract(segment.samples(&denoised)))
    }
}

/// A single feature row: vitals columns followed by per-channel feature
/// columns, in the configured order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Column names in row order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column values in row order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column, if present
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }
}

/// Assembles the final feature row from vitals and sensor traces
#[derive(Debug, Clone)]
pub struct FeatureMatrixBuilder {
    config: PipelineConfig,
    pipeline: ChannelFeaturePipeline,
}

impl FeatureMatrixBuilder {
    /// Create a builder with an explicit configuration
    pub fn new(config: PipelineConfig) -> Self {
        let pipeline = ChannelFeaturePipeline::new(&config);
        Self { config, pipeline }
    }

    /// Create a builder with the reference deployment configuration
    pub fn with_reference_config() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// The builder's configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full output column list: vitals fields, then per-channel feature
    /// columns named `{channel}_{feature}`
    pub fn column_names(&self) -> Vec<String> {
        let mut columns: Vec<String> = VITALS_FIELDS.iter().map(|s| s.to_string()).collect();
        for channel in &self.config.channels {
            for feature in &FEATURE_NAMES {
                columns.push(format!("{}_{}", channel, feature));
            }
        }
        columns
    }

    /// Build the feature row for one breath sample
    ///
    /// Channels are processed in configured order (fanned out with rayon
    /// under the `parallel` feature, reassembled in configured order).
    ///
    /// # Errors
    ///
    /// * `MissingChannel` - a configured channel is absent from the table
    /// * `ColumnMismatch` - the table carries an unconfigured channel, or
    ///   channel lengths disagree
    /// * `InvalidInput` - malformed vitals or a channel trace too short
    ///   or non-finite (propagated from the per-channel pipeline)
    ///
    /// Any error aborts the whole row; no partial row is ever returned.
    pub fn build(&self, vitals: &Vitals, table: &ChannelTable) -> Result<FeatureRow, FeatureError> {
        vitals.validate()?;
        self.validate_schema(table)?;

        log::debug!(
            "Building feature row: {} channels, {} columns",
            self.config.channels.len(),
            VITALS_FIELDS.len() + self.config.channels.len() * FEATURE_NAMES.len()
        );

        let blocks = self.process_channels(table)?;

        let mut values: Vec<f64> = vitals.to_values().to_vec();
        for block in &blocks {
            values.extend_from_slice(&block.to_array());
        }

        Ok(FeatureRow {
            columns: self.column_names(),
            values,
        })
    }

    fn validate_schema(&self, table: &ChannelTable) -> Result<(), FeatureError> {
        if self.config.channels.is_empty() {
            return Err(FeatureError::ColumnMismatch(
                "Configured channel list is empty".to_string(),
            ));
        }

        for channel in &self.config.channels {
            if table.get(channel).is_none() {
                return Err(FeatureError::MissingChannel(channel.clone()));
            }
        }

        for name in table.names() {
            if !self.config.channels.iter().any(|c| c == name) {
                return Err(FeatureError::ColumnMismatch(format!(
                    "Unconfigured channel '{}' in input",
                    name
                )));
            }
        }

        // All channels must carry the same number of rows
        let first = &self.config.channels[0];
        let expected = table.get(first).map(|s| s.len()).unwrap_or(0);
        for channel in &self.config.channels[1..] {
            let len = table.get(channel).map(|s| s.len()).unwrap_or(0);
            if len != expected {
                return Err(FeatureError::ColumnMismatch(format!(
                    "Channel '{}' has {} rows, expected {} (from '{}')",
                    channel, len, expected, first
                )));
            }
        }

        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn process_channels(&self, table: &ChannelTable) -> Result<Vec<FeatureBlock>, FeatureError> {
        self.config
            .channels
            .iter()
            .map(|channel| {
                log::debug!("Processing channel {}", channel);
                // Presence was validated up front
                let raw = table.get(channel).ok_or_else(|| {
                    FeatureError::MissingChannel(channel.clone())
                })?;
                self.pipeline.process_channel(raw)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn process_channels(&self, table: &ChannelTable) -> Result<Vec<FeatureBlock>, FeatureError> {
        // Indexed collect keeps configured channel order regardless of
        // completion order
        self.config
            .channels
            .par_iter()
            .map(|channel| {
                log::debug!("Processing channel {}", channel);
                let raw = table.get(channel).ok_or_else(|| {
                    FeatureError::MissingChannel(channel.clone())
                })?;
                self.pipeline.process_channel(raw)
            })
            .collect()
    }
}
