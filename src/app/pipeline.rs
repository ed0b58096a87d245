//! Shared command pipelines.
//!
//! Each function here is one command's workflow with presentation stripped out:
//! ingest -> pipeline -> (optional) artifact write. `app` decides what to print.

use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::data::generate_listings;
use crate::domain::{Listing, ModelFile, PredictConfig, PricedListing, SampleConfig, TrainConfig};
use crate::error::AppError;
use crate::features::{NormalizedFeatureVector, build_feature_vector};
use crate::fit::train_linear;
use crate::io::ingest::{IngestedData, PriceColumn, load_listings};
use crate::io::model_file::write_model_file;
use crate::models::ModelHandle;
use crate::predict::PricePredictor;

/// Outputs of `fairprice predict`.
#[derive(Debug, Clone)]
pub struct PredictRun {
    /// Ingest bookkeeping; `listings` has been moved into `priced`.
    pub ingest: IngestedData,
    pub priced: Vec<PricedListing>,
    pub model_loaded: bool,
}

/// Outputs of `fairprice train`.
#[derive(Debug, Clone)]
pub struct TrainRun {
    pub ingest: IngestedData,
    pub model: ModelFile,
}

/// Predict every listing in the configured CSV with the process-wide model.
pub fn run_predict(config: &PredictConfig) -> Result<PredictRun, AppError> {
    let mut ingest = load_listings(&config.csv_path, PriceColumn::Optional)?;
    let model = ModelHandle::shared(&config.model_path);

    let listings = std::mem::take(&mut ingest.listings);
    let priced = predict_listings(model, listings);

    let available = priced.iter().filter(|p| p.prediction.is_ok()).count();
    info!(listings = priced.len(), available, "predictions complete");

    if let Some(path) = &config.export_path {
        crate::io::export::write_predictions_csv(path, &priced)?;
        info!(path = %path.display(), "predictions exported");
    }

    Ok(PredictRun {
        ingest,
        priced,
        model_loaded: model.is_loaded(),
    })
}

/// Predict listings against an explicit handle.
pub fn predict_listings(model: &ModelHandle, listings: Vec<Listing>) -> Vec<PricedListing> {
    PricePredictor::new(model).price_listings(listings)
}

/// Feature vectors for every listing in a CSV.
pub fn run_features(csv_path: &Path) -> Result<(IngestedData, Vec<(String, NormalizedFeatureVector)>), AppError> {
    let mut ingest = load_listings(csv_path, PriceColumn::Optional)?;
    let vectors = std::mem::take(&mut ingest.listings)
        .into_iter()
        .map(|l| {
            let v = build_feature_vector(&l.attributes);
            (l.id, v)
        })
        .collect();
    Ok((ingest, vectors))
}

/// Train a linear model on the configured CSV and write it out.
pub fn run_train(config: &TrainConfig) -> Result<TrainRun, AppError> {
    let ingest = load_listings(&config.csv_path, PriceColumn::Required)?;
    let model = train_linear(&ingest.listings, Local::now().date_naive())?;
    write_model_file(&config.output_path, &model)?;
    info!(
        path = %config.output_path.display(),
        n = model.quality.n,
        r2 = model.quality.r2,
        "model written"
    );
    Ok(TrainRun { ingest, model })
}

/// Generate synthetic listings.
pub fn run_sample(config: &SampleConfig) -> Result<Vec<Listing>, AppError> {
    generate_listings(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::PropertyAttributes;
    use crate::features::{AREA_RANGE, FEATURE_COUNT};
    use crate::io::export::write_listings;
    use crate::io::model_file::read_model_file;
    use crate::models::LinearModel;

    fn priced_sample(dir: &std::path::Path, n: usize) -> PathBuf {
        let listings: Vec<Listing> = generate_listings(&SampleConfig {
            count: n,
            seed: 8,
            output_path: None,
        })
        .unwrap()
        .into_iter()
        .map(|mut l| {
            l.listed_price = Some(price_of(&l.attributes));
            l
        })
        .collect();
        let path = dir.join("listings.csv");
        write_listings(std::fs::File::create(&path).unwrap(), &listings).unwrap();
        path
    }

    fn price_of(a: &PropertyAttributes) -> f64 {
        1_500_000.0 + 2_500_000.0 * AREA_RANGE.normalize(a.area_sqft) + 100_000.0 * f64::from(a.bathrooms)
    }

    #[test]
    fn train_then_predict_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = priced_sample(dir.path(), 80);
        let model_path = dir.path().join("model.json");

        let trained = run_train(&TrainConfig {
            csv_path: csv_path.clone(),
            output_path: model_path.clone(),
        })
        .unwrap();
        assert_eq!(trained.ingest.rows_used, 80);

        // Use an explicit handle; the process-wide one may already be set by other tests.
        let file = read_model_file(&model_path).unwrap();
        let handle = ModelHandle::from_regressor(LinearModel::from_file(&file).unwrap());
        let priced = predict_listings(&handle, trained.ingest.listings.clone());

        for p in &priced {
            let predicted = p.price().unwrap();
            let truth = p.listing.listed_price.unwrap();
            assert!(((predicted - truth) / truth).abs() < 1e-6, "{} {predicted} vs {truth}", p.listing.id);
        }
    }

    #[test]
    fn predict_with_missing_model_reports_absence_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = priced_sample(dir.path(), 5);
        let handle = ModelHandle::load(&dir.path().join("nope.json"));

        let ingest = load_listings(&csv_path, PriceColumn::Optional).unwrap();
        let priced = predict_listings(&handle, ingest.listings);
        assert_eq!(priced.len(), 5);
        assert!(priced.iter().all(|p| p.price().is_none()));
    }

    #[test]
    fn features_follow_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = priced_sample(dir.path(), 4);
        let (ingest, vectors) = run_features(&csv_path).unwrap();
        assert_eq!(ingest.rows_used, 4);
        let ids: Vec<&str> = vectors.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["S-0001", "S-0002", "S-0003", "S-0004"]);
        assert!(vectors.iter().all(|(_, v)| v.as_slice().len() == FEATURE_COUNT));
    }
}
