//! Configuration parameters for the feature pipeline
//!
//! The original deployment read a shared global channel list from
//! multiple components; here the configuration is an explicit value
//! handed to the pipeline constructor. The channel list and its order
//! are a public contract with the pre-trained models: the models were
//! fit on exactly these columns in exactly this order.

/// Reference sensor channel names, in model column order
///
/// Changing this list (or its order) without retraining the downstream
/// classifier and regressor silently corrupts predictions.
pub const REFERENCE_CHANNELS: [&str; 9] = [
    "MQ138", "MQ2", "TGS2600", "TGS2602", "TGS2603", "TGS2610", "TGS2611", "TGS2620", "TGS822",
];

/// Feature pipeline configuration parameters
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Sampling rate of the sensor traces in Hz (default: 100.0)
    pub sampling_rate: f64,

    /// Sensor channel names in model column order (default: [`REFERENCE_CHANNELS`])
    pub channels: Vec<String>,

    // Segment location
    /// Prominence band for true-peak detection, (min, max) (default: (0.25, 1.5))
    pub prominence_range: (f64, f64),

    /// Width band for true-peak detection in samples, (min, max) (default: (10.0, 60.0))
    pub width_range: (f64, f64),

    /// Sustained-decline window length in samples that marks the start
    /// of the decay phase (default: 20)
    pub decay_duration: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 100.0,
            channels: REFERENCE_CHANNELS.iter().map(|s| s.to_string()).collect(),
            prominence_range: (0.25, 1.5),
            width_range: (10.0, 60.0),
            decay_duration: 20,
        }
    }
}
