//! Prediction seam and diagnostic result types
//!
//! The trained classifier and regressor are external artifacts. This
//! module defines the trait boundary they plug into and the result
//! types the caller presents: a severity tier and an optional BGL
//! estimate rounded to two decimals.

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;
use crate::pipeline::FeatureRow;

/// Diabetes risk severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Blood sugar in the normal range
    NonDiabetic,
    /// Elevated blood sugar
    PreDiabetic,
    /// Strongly elevated blood sugar
    HighlyDiabetic,
}

impl RiskLabel {
    /// Map a classifier class index to its tier
    ///
    /// Class 0 and 1 are the low and medium tiers; every other index is
    /// the high tier, matching the deployed classifier's encoding.
    pub fn from_class_index(index: u32) -> Self {
        match index {
            0 => RiskLabel::NonDiabetic,
            1 => RiskLabel::PreDiabetic,
            _ => RiskLabel::HighlyDiabetic,
        }
    }

    /// Tier name for reports
    pub fn name(&self) -> &'static str {
        match self {
            RiskLabel::NonDiabetic => "Non-diabetic",
            RiskLabel::PreDiabetic => "Pre-diabetic",
            RiskLabel::HighlyDiabetic => "Highly diabetic",
        }
    }

    /// User-facing message for the tier
    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::NonDiabetic => "Your Blood Sugar is Low",
            RiskLabel::PreDiabetic => "Your Blood Sugar is Medium",
            RiskLabel::HighlyDiabetic => "Your Blood Sugar is High",
        }
    }
}

/// A pre-trained severity classifier consuming the fixed-order feature row
pub trait RiskClassifier {
    /// Predict the risk tier for one feature row
    fn predict(&self, row: &FeatureRow) -> Result<RiskLabel, FeatureError>;
}

/// A pre-trained BGL regressor consuming the fixed-order feature row
pub trait BglRegressor {
    /// Predict the blood glucose level in mg/dL for one feature row
    fn predict(&self, row: &FeatureRow) -> Result<f64, FeatureError>;
}

/// Round a BGL estimate to two decimals for reporting
pub fn round_bgl(bgl: f64) -> f64 {
    (bgl * 100.0).round() / 100.0
}

/// Combined diagnostic outcome for one breath sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Predicted severity tier
    pub label: RiskLabel,
    /// BGL estimate in mg/dL, rounded to two decimals; absent when no
    /// regressor was supplied
    pub bgl: Option<f64>,
}

/// Run the supplied models over a feature row
///
/// # Errors
///
/// Propagates any model error unchanged; a failed prediction yields no
/// partial diagnosis.
pub fn diagnose(
    classifier: &dyn RiskClassifier,
    regressor: Option<&dyn BglRegressor>,
    row: &FeatureRow,
) -> Result<Diagnosis, FeatureError> {
    let label = classifier.predict(row)?;
    let bgl = match regressor {
        Some(model) => Some(round_bgl(model.predict(row)?)),
        None => None,
    };

    log::debug!("Diagnosis: {:?}, BGL={:?}", label, bgl);

    Ok(Diagnosis { label, bgl })
}
