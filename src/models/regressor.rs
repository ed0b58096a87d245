//! Regression model capability.
//!
//! The pipeline only needs `predict(vector) -> price`. Anything that can provide
//! that (the bundled linear model, a test double, a future tree ensemble) plugs in
//! through `Regressor`.

use crate::domain::{ModelFile, ModelKind};
use crate::error::InferenceError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

/// A loaded, read-only regression model.
///
/// Implementations must be deterministic and must not mutate themselves during
/// `predict`; one instance is shared across threads.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Short human-readable description (for logs).
    fn name(&self) -> &str;
}

/// `price = intercept + Σ coefficient_i * feature_i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Build from a saved artifact, refusing layouts this crate does not produce.
    pub fn from_file(file: &ModelFile) -> Result<Self, String> {
        if file.kind != ModelKind::Linear {
            return Err(format!("unsupported model kind {:?}", file.kind));
        }
        let expected: Vec<&str> = FEATURE_NAMES.to_vec();
        let stored: Vec<&str> = file.feature_names.iter().map(String::as_str).collect();
        if stored != expected {
            return Err(format!(
                "feature layout mismatch: model was trained on [{}]",
                stored.join(", ")
            ));
        }
        if file.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "model has {} coefficients, expected {FEATURE_COUNT}",
                file.coefficients.len()
            ));
        }
        if !file.intercept.is_finite() || file.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model parameters contain non-finite values".to_string());
        }
        Ok(Self::new(file.intercept, file.coefficients.clone()))
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        let y = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>();
        if !y.is_finite() {
            return Err(InferenceError::NonFinite(y));
        }
        Ok(y)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
