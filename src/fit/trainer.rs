//! Price model training.
//!
//! Given labelled listings `(attributes_i, price_i)` we:
//! - build each listing's feature vector through the same pipeline used at
//!   prediction time (so training and serving cannot drift)
//! - prepend an intercept column and solve ordinary least squares
//! - report RMSE / R² on the training set
//!
//! The result is a `ModelFile` ready to be written and loaded by `ModelHandle`.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::{FitQuality, Listing, ModelFile, ModelKind};
use crate::error::AppError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES, build_feature_vector};
use crate::math::solve_least_squares;
use crate::models::{LinearModel, Regressor};

/// Name recorded in every artifact this crate writes.
pub const TOOL_NAME: &str = "fairprice";

/// Fit a linear price model on labelled listings.
pub fn train_linear(listings: &[Listing], trained_on: NaiveDate) -> Result<ModelFile, AppError> {
    let p = FEATURE_COUNT + 1;
    let n = listings.len();
    if n <= p {
        return Err(AppError::new(
            3,
            format!("Need more than {p} labelled listings to train, got {n}."),
        ));
    }

    let prices: Vec<f64> = listings
        .iter()
        .map(|l| {
            l.listed_price
                .ok_or_else(|| AppError::new(2, format!("Listing '{}' has no price; cannot train on it.", l.id)))
        })
        .collect::<Result<_, _>>()?;

    let rows: Vec<Vec<f64>> = listings
        .par_iter()
        .map(|l| {
            let mut row = Vec::with_capacity(p);
            row.push(1.0);
            row.extend_from_slice(build_feature_vector(&l.attributes).as_slice());
            row
        })
        .collect();

    let x = DMatrix::from_fn(n, p, |i, j| rows[i][j]);
    let y = DVector::from_vec(prices.clone());

    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| AppError::new(4, "Least squares solve failed (design matrix too ill-conditioned)."))?;

    let intercept = beta[0];
    let coefficients: Vec<f64> = beta.iter().skip(1).copied().collect();
    let model = LinearModel::new(intercept, coefficients.clone());

    let quality = fit_quality(&model, &rows, &prices)?;
    debug!(n, rmse = quality.rmse, r2 = quality.r2, "linear price model trained");

    Ok(ModelFile {
        tool: TOOL_NAME.to_string(),
        kind: ModelKind::Linear,
        trained_on,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        intercept,
        coefficients,
        quality,
    })
}

fn fit_quality(model: &LinearModel, rows: &[Vec<f64>], prices: &[f64]) -> Result<FitQuality, AppError> {
    let n = prices.len();
    let mut sse = 0.0;
    for (row, &price) in rows.iter().zip(prices) {
        let fitted = model
            .predict(&row[1..])
            .map_err(|e| AppError::new(4, format!("Trained model failed on its own training data: {e}")))?;
        sse += (price - fitted).powi(2);
    }

    let mean = prices.iter().sum::<f64>() / n as f64;
    let sst: f64 = prices.iter().map(|v| (v - mean).powi(2)).sum();
    let r2 = if sst > 0.0 { 1.0 - sse / sst } else { 0.0 };

    Ok(FitQuality {
        rmse: (sse / n as f64).sqrt(),
        r2,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::generate_attributes;
    use crate::domain::PropertyAttributes;
    use crate::features::quality::total_quality;
    use crate::features::{AGE_RANGE, AREA_RANGE, DISTANCE_RANGE, average_distance, property_age};

    fn known_price(a: &PropertyAttributes) -> f64 {
        2_000_000.0 + 3_000_000.0 * AREA_RANGE.normalize(a.area_sqft)
            - 1_000_000.0 * AGE_RANGE.normalize(property_age(a.built_year))
            - 400_000.0 * DISTANCE_RANGE.normalize(average_distance(a))
            + 250_000.0 * total_quality(&a.quality)
            + 150_000.0 * f64::from(a.bedrooms)
            + 50_000.0 * f64::from(a.area_type.code())
    }

    fn labelled(n: usize, seed: u64) -> Vec<Listing> {
        generate_attributes(n, seed)
            .into_iter()
            .enumerate()
            .map(|(i, attributes)| Listing {
                id: format!("T-{i}"),
                listed_price: Some(known_price(&attributes)),
                attributes,
            })
            .collect()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn recovers_an_exactly_linear_price() {
        let listings = labelled(150, 21);
        let file = train_linear(&listings, day()).unwrap();

        assert_eq!(file.feature_names.len(), FEATURE_COUNT);
        assert_eq!(file.quality.n, 150);
        assert!(file.quality.r2 > 0.999_999, "r2 = {}", file.quality.r2);

        let model = LinearModel::from_file(&file).unwrap();
        for l in labelled(40, 99) {
            let predicted = model
                .predict(build_feature_vector(&l.attributes).as_slice())
                .unwrap();
            let truth = l.listed_price.unwrap();
            assert!(((predicted - truth) / truth).abs() < 1e-6, "{predicted} vs {truth}");
        }
    }

    #[test]
    fn too_few_rows_is_rejected() {
        let err = train_linear(&labelled(FEATURE_COUNT, 1), day()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unlabelled_rows_are_rejected() {
        let mut listings = labelled(60, 2);
        listings[10].listed_price = None;
        let err = train_linear(&listings, day()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("T-10"));
    }
}
