//! Fixed-range feature scaling.
//!
//! Physical measurements are mapped into `[0, 1]` against hardcoded calibration
//! ranges (the ranges the model was trained with, not ranges observed in live
//! data). Values outside a range are clipped to its boundary first, so an unusual
//! property still gets a prediction instead of a wild extrapolation.

use crate::domain::PropertyAttributes;

/// Year property age is measured against.
pub const REFERENCE_YEAR: i32 = 2024;

/// A `[min, max]` pair used to rescale a raw measurement into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRange {
    pub min: f64,
    pub max: f64,
}

/// Floor area (sq ft).
pub const AREA_RANGE: CalibrationRange = CalibrationRange { min: 500.0, max: 3000.0 };

/// Amenity distance (km); shared by all three amenities and their mean.
pub const DISTANCE_RANGE: CalibrationRange = CalibrationRange { min: 0.1, max: 5.0 };

/// Property age (years).
pub const AGE_RANGE: CalibrationRange = CalibrationRange { min: 0.0, max: 50.0 };

impl CalibrationRange {
    pub fn clamp(self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    pub fn scale(self, value: f64) -> f64 {
        scale(value, self.min, self.max)
    }

    /// Clamp, then scale. Always in `[0, 1]` for finite input.
    pub fn normalize(self, value: f64) -> f64 {
        self.scale(self.clamp(value))
    }
}

/// Clip `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear rescale of `[min, max]` onto `[0, 1]`. Not clipped.
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Continuous features of one property, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatures {
    pub area: f64,
    pub age: f64,
    pub atm_distance: f64,
    pub hospital_distance: f64,
    pub school_distance: f64,
    pub average_distance: f64,
}

/// Age in years relative to `REFERENCE_YEAR` (negative for future builds).
pub fn property_age(built_year: i32) -> f64 {
    f64::from(REFERENCE_YEAR) - f64::from(built_year)
}

/// Mean of the three raw amenity distances.
pub fn average_distance(attrs: &PropertyAttributes) -> f64 {
    (attrs.atm_km + attrs.hospital_km + attrs.school_km) / 3.0
}

/// Scale the continuous attributes of `attrs`.
pub fn normalize(attrs: &PropertyAttributes) -> ScaledFeatures {
    ScaledFeatures {
        area: AREA_RANGE.normalize(attrs.area_sqft),
        age: AGE_RANGE.normalize(property_age(attrs.built_year)),
        atm_distance: DISTANCE_RANGE.normalize(attrs.atm_km),
        hospital_distance: DISTANCE_RANGE.normalize(attrs.hospital_km),
        school_distance: DISTANCE_RANGE.normalize(attrs.school_km),
        average_distance: DISTANCE_RANGE.normalize(average_distance(attrs)),
    }
}
