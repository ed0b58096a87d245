//! Fair-price prediction.
//!
//! The single entry point every screen goes through:
//!
//! `PropertyAttributes -> feature vector -> Regressor::predict -> price`
//!
//! Prices are returned at full model precision. A missing model or a failed
//! inference is reported as a `PredictError`; `predict_or_absent` turns that into
//! `None` for display code, which shows it as "N/A".

use rayon::prelude::*;
use tracing::{trace, warn};

use crate::domain::{Listing, PricedListing, PropertyAttributes};
use crate::error::PredictError;
use crate::features::build_feature_vector;
use crate::models::ModelHandle;

/// Stateless predictor over a borrowed model handle.
#[derive(Debug, Clone, Copy)]
pub struct PricePredictor<'m> {
    model: &'m ModelHandle,
}

impl<'m> PricePredictor<'m> {
    pub fn new(model: &'m ModelHandle) -> Self {
        Self { model }
    }

    /// Predicted price for `attrs`.
    ///
    /// The handle is checked before any feature work, so an unloaded model costs
    /// nothing per call.
    pub fn predict(&self, attrs: &PropertyAttributes) -> Result<f64, PredictError> {
        let regressor = self.model.regressor()?;
        let features = build_feature_vector(attrs);
        trace!(model = regressor.name(), features = ?features.as_slice(), "predicting");
        let price = regressor.predict(features.as_slice())?;
        Ok(price)
    }

    /// Predicted price, or `None` after logging why there is none.
    pub fn predict_or_absent(&self, attrs: &PropertyAttributes) -> Option<f64> {
        match self.predict(attrs) {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(error = %err, "no price prediction");
                None
            }
        }
    }

    /// Predict a batch in parallel. Output order matches input order.
    pub fn predict_many(&self, attrs: &[PropertyAttributes]) -> Vec<Result<f64, PredictError>> {
        attrs.par_iter().map(|a| self.predict(a)).collect()
    }

    /// Annotate listings with their predicted prices, in input order.
    pub fn price_listings(&self, listings: Vec<Listing>) -> Vec<PricedListing> {
        listings
            .into_par_iter()
            .map(|listing| {
                let prediction = self.predict(&listing.attributes);
                if let Err(err) = &prediction {
                    warn!(id = %listing.id, error = %err, "no price prediction");
                }
                PricedListing { listing, prediction }
            })
            .collect()
    }
}
