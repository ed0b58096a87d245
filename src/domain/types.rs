//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built by any caller (form layer, remote store, CSV ingest)
//! - fed to the prediction pipeline unchanged
//! - exported to JSON/CSV

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AreaType, QualityRatings};
use crate::error::PredictError;

/// Raw attributes of one property: the pipeline input.
///
/// Callers must run `validate` before handing a record to the pipeline; the
/// pipeline itself only clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    /// Floor area in square feet.
    pub area_sqft: f64,
    pub built_year: i32,
    /// Distance to the nearest ATM (km).
    pub atm_km: f64,
    /// Distance to the nearest hospital (km).
    pub hospital_km: f64,
    /// Distance to the nearest school (km).
    pub school_km: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub balconies: u32,
    pub floors: u32,
    #[serde(flatten)]
    pub quality: QualityRatings,
    pub area_type: AreaType,
}

impl PropertyAttributes {
    /// Basic sanity checks a caller applies before predicting.
    ///
    /// Out-of-calibration values (a 6000 sq ft villa, a 1890 build) are fine here;
    /// the normalizer clamps them. Only values that cannot describe a property are
    /// rejected.
    pub fn validate(&self) -> Result<(), PredictError> {
        if !self.area_sqft.is_finite() || self.area_sqft <= 0.0 {
            return Err(PredictError::invalid("area_sqft", format!("must be > 0, got {}", self.area_sqft)));
        }
        if self.built_year <= 0 {
            return Err(PredictError::invalid("built_year", format!("must be positive, got {}", self.built_year)));
        }
        for (field, value) in [
            ("atm_km", self.atm_km),
            ("hospital_km", self.hospital_km),
            ("school_km", self.school_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PredictError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }
        if self.floors == 0 {
            return Err(PredictError::invalid("floors", "must be at least 1"));
        }
        Ok(())
    }
}

/// A property as it appears in an input file: attributes plus identity and,
/// optionally, the asking price.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub attributes: PropertyAttributes,
    /// Asking price when the file carries one (required for training).
    pub listed_price: Option<f64>,
}

/// A listing annotated with its predicted price (or why there is none).
#[derive(Debug, Clone)]
pub struct PricedListing {
    pub listing: Listing,
    pub prediction: Result<f64, PredictError>,
}

impl PricedListing {
    pub fn price(&self) -> Option<f64> {
        self.prediction.as_ref().ok().copied()
    }
}

/// Configuration for `fairprice predict`.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub csv_path: PathBuf,
    /// Resolved model artifact path (`--model` or `FAIRPRICE_MODEL`).
    pub model_path: PathBuf,
    pub export_path: Option<PathBuf>,
    pub currency_symbol: String,
}

/// Configuration for `fairprice train`.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub csv_path: PathBuf,
    pub output_path: PathBuf,
}

/// Configuration for `fairprice sample`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub output_path: Option<PathBuf>,
}

/// Supported model artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Linear,
}

/// Fit diagnostics stored alongside a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub rmse: f64,
    pub r2: f64,
    pub n: usize,
}

/// A saved price model (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub kind: ModelKind,
    pub trained_on: NaiveDate,
    /// Input layout the model was trained against.
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
}

#[cfg(test)]
pub(crate) fn typical_attributes() -> PropertyAttributes {
    PropertyAttributes {
        area_sqft: 1750.0,
        built_year: 1999,
        atm_km: 0.5,
        hospital_km: 2.0,
        school_km: 1.1,
        bedrooms: 3,
        bathrooms: 2,
        balconies: 1,
        floors: 2,
        quality: QualityRatings::lowest(),
        area_type: AreaType::SuperBuiltUp,
    }
}
