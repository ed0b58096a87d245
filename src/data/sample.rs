//! Synthetic listing generation.
//!
//! Produces plausible, always-valid property attributes from a seed. Used by
//! `fairprice sample` for demo files and by tests that need many distinct inputs.
//! Draws deliberately overshoot the calibration ranges now and then so the
//! clamping path is exercised.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::domain::{
    AreaType, BrickType, CementGrade, ElectricalQuality, FlooringQuality, Listing, PaintQuality, PlumbingQuality,
    PropertyAttributes, QualityRatings, RoofingType, SampleConfig, SteelGrade, WindowGlassQuality, WoodQuality,
};
use crate::error::AppError;

/// Floor area draw (sq ft): normal, floored at `MIN_AREA`.
const AREA_MEAN: f64 = 1500.0;
const AREA_SD: f64 = 600.0;
const MIN_AREA: f64 = 250.0;

/// Log-scale spread of amenity distances (median 1 km).
const DISTANCE_LOG_SD: f64 = 0.8;

pub fn generate_listings(config: &SampleConfig) -> Result<Vec<Listing>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    Ok(generate_attributes(config.count, config.seed)
        .into_iter()
        .enumerate()
        .map(|(i, attributes)| Listing {
            id: format!("S-{:04}", i + 1),
            attributes,
            listed_price: None,
        })
        .collect())
}

/// `count` valid attribute records, deterministic for a given `seed`.
pub fn generate_attributes(count: usize, seed: u64) -> Vec<PropertyAttributes> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let bedrooms = rng.gen_range(1..=5);
            PropertyAttributes {
                area_sqft: round_to(AREA_MEAN + AREA_SD * normal(&mut rng), 0).max(MIN_AREA),
                built_year: rng.gen_range(1965..=2026),
                atm_km: round_to(distance_km(&mut rng), 2),
                hospital_km: round_to(distance_km(&mut rng) * 1.5, 2),
                school_km: round_to(distance_km(&mut rng), 2),
                bedrooms,
                bathrooms: rng.gen_range(1..=bedrooms),
                balconies: rng.gen_range(0..=3),
                floors: rng.gen_range(1..=4),
                quality: random_quality(&mut rng),
                area_type: pick(&mut rng, AreaType::ALL),
            }
        })
        .collect()
}

fn random_quality(rng: &mut StdRng) -> QualityRatings {
    QualityRatings {
        wood: pick(rng, WoodQuality::ALL),
        cement_grade: pick(rng, CementGrade::ALL),
        steel_grade: pick(rng, SteelGrade::ALL),
        brick_type: pick(rng, BrickType::ALL),
        flooring: pick(rng, FlooringQuality::ALL),
        paint: pick(rng, PaintQuality::ALL),
        plumbing: pick(rng, PlumbingQuality::ALL),
        electrical: pick(rng, ElectricalQuality::ALL),
        roofing: pick(rng, RoofingType::ALL),
        window_glass: pick(rng, WindowGlassQuality::ALL),
    }
}

fn normal(rng: &mut StdRng) -> f64 {
    rng.sample(StandardNormal)
}

/// Log-normal distance in km.
fn distance_km(rng: &mut StdRng) -> f64 {
    (DISTANCE_LOG_SD * normal(rng)).exp()
}

fn pick<T: Copy>(rng: &mut StdRng, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_attributes_are_valid() {
        for attrs in generate_attributes(500, 42) {
            attrs.validate().unwrap();
            assert!(attrs.bathrooms <= attrs.bedrooms);
        }
    }

    #[test]
    fn same_seed_same_sample() {
        assert_eq!(generate_attributes(20, 9), generate_attributes(20, 9));
        assert_ne!(generate_attributes(20, 9), generate_attributes(20, 10));
    }

    #[test]
    fn zero_count_is_rejected() {
        let config = SampleConfig {
            count: 0,
            seed: 1,
            output_path: None,
        };
        assert_eq!(generate_listings(&config).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn listing_ids_are_sequential() {
        let config = SampleConfig {
            count: 3,
            seed: 1,
            output_path: None,
        };
        let ids: Vec<String> = generate_listings(&config).unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, ["S-0001", "S-0002", "S-0003"]);
    }
}
