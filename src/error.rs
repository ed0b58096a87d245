//! Error types.
//!
//! - `PredictError` / `InferenceError`: typed failures of the prediction pipeline.
//!   Callers treat every one of them as "no prediction", never as a crash.
//! - `AppError`: CLI boundary error carrying a process exit code.

use thiserror::Error;

/// Failure of a single model invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("feature vector has {got} values, model expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model returned a non-finite value ({0})")]
    NonFinite(f64),
}

/// Why a price could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The model handle never loaded. Permanent for that handle.
    #[error("price model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// One invocation failed. Not retried.
    #[error("price prediction failed: {source}")]
    PredictionFailed {
        #[from]
        source: InferenceError,
    },

    /// Attributes failed sanity checks. Raised by callers before the pipeline runs.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl PredictError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PredictError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Short machine-readable label (used in exports).
    pub fn status_label(&self) -> &'static str {
        match self {
            PredictError::ModelUnavailable { .. } => "model_unavailable",
            PredictError::PredictionFailed { .. } => "prediction_failed",
            PredictError::InvalidInput { .. } => "invalid_input",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
