//! Model input assembly.
//!
//! The vector layout is part of the model contract: a model trained against one
//! layout is meaningless against another. `FEATURE_NAMES` is stored in every model
//! artifact and checked at load time.

use serde::Serialize;

use crate::domain::PropertyAttributes;
use crate::features::normalizer::normalize;
use crate::features::quality::total_quality;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 22;

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "area_scaled",
    "age_scaled",
    "atm_distance_scaled",
    "hospital_distance_scaled",
    "school_distance_scaled",
    "average_distance_scaled",
    "wood",
    "cement_grade",
    "steel_grade",
    "brick_type",
    "flooring",
    "paint",
    "plumbing",
    "electrical",
    "roofing",
    "window_glass",
    "total_quality",
    "bedrooms",
    "bathrooms",
    "balconies",
    "floors",
    "area_type",
];

/// Ordered model input for one property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl NormalizedFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value by feature name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in vector order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

/// Build the model input for `attrs`.
///
/// Continuous attributes are clamped and scaled, categorical codes and counts are
/// passed through raw, and the composite quality sits between them.
pub fn build_feature_vector(attrs: &PropertyAttributes) -> NormalizedFeatureVector {
    let scaled = normalize(attrs);
    let q = attrs.quality.codes();

    let values = [
        scaled.area,
        scaled.age,
        scaled.atm_distance,
        scaled.hospital_distance,
        scaled.school_distance,
        scaled.average_distance,
        f64::from(q[0].1),
        f64::from(q[1].1),
        f64::from(q[2].1),
        f64::from(q[3].1),
        f64::from(q[4].1),
        f64::from(q[5].1),
        f64::from(q[6].1),
        f64::from(q[7].1),
        f64::from(q[8].1),
        f64::from(q[9].1),
        total_quality(&attrs.quality),
        f64::from(attrs.bedrooms),
        f64::from(attrs.bathrooms),
        f64::from(attrs.balconies),
        f64::from(attrs.floors),
        f64::from(attrs.area_type.code()),
    ];

    NormalizedFeatureVector { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::typical_attributes;
    use crate::domain::{AreaType, QualityCategory, QualityRatings};

    #[test]
    fn quality_names_match_category_columns() {
        for (i, category) in QualityCategory::ALL.iter().enumerate() {
            assert_eq!(FEATURE_NAMES[6 + i], category.column());
        }
    }

    #[test]
    fn typical_vector_layout() {
        let attrs = PropertyAttributes {
            quality: QualityRatings::highest(),
            area_type: AreaType::Carpet,
            ..typical_attributes()
        };
        let v = build_feature_vector(&attrs);
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
        assert_eq!(v.get("area_scaled"), Some(0.5));
        assert_eq!(v.get("age_scaled"), Some(0.5));
        assert_eq!(v.get("cement_grade"), Some(53.0));
        assert_eq!(v.get("wood"), Some(2.0));
        assert_eq!(v.get("total_quality"), Some(1.9));
        assert_eq!(v.get("bedrooms"), Some(3.0));
        assert_eq!(v.get("floors"), Some(2.0));
        assert_eq!(v.get("area_type"), Some(2.0));
        assert_eq!(v.get("no_such_feature"), None);
    }

    #[test]
    fn continuous_features_stay_in_unit_interval() {
        let attrs = PropertyAttributes {
            area_sqft: 12_000.0,
            built_year: 1850,
            atm_km: 0.0,
            hospital_km: 40.0,
            school_km: 0.02,
            ..typical_attributes()
        };
        let v = build_feature_vector(&attrs);
        for value in &v.as_slice()[..6] {
            assert!((0.0..=1.0).contains(value), "{value}");
        }
    }

    #[test]
    fn identical_inputs_give_identical_vectors() {
        let a = build_feature_vector(&typical_attributes());
        let b = build_feature_vector(&typical_attributes());
        assert_eq!(a, b);
    }

    #[test]
    fn every_field_reaches_the_vector() {
        let base = typical_attributes();
        let base_v = build_feature_vector(&base);
        let variants = [
            PropertyAttributes { area_sqft: 2000.0, ..base },
            PropertyAttributes { built_year: 2010, ..base },
            PropertyAttributes { atm_km: 1.5, ..base },
            PropertyAttributes { hospital_km: 3.5, ..base },
            PropertyAttributes { school_km: 4.0, ..base },
            PropertyAttributes { bedrooms: 4, ..base },
            PropertyAttributes { bathrooms: 3, ..base },
            PropertyAttributes { balconies: 2, ..base },
            PropertyAttributes { floors: 3, ..base },
            PropertyAttributes { area_type: AreaType::Plot, ..base },
            PropertyAttributes { quality: QualityRatings::highest(), ..base },
        ];
        for attrs in variants {
            assert_ne!(build_feature_vector(&attrs), base_v, "{attrs:?}");
        }
    }
}
