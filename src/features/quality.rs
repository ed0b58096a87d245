//! Composite quality score.
//!
//! Ten ratings collapse into one scalar:
//!
//! ```text
//! total_quality = Σ normalized(code_c) / 10
//! ```
//!
//! Ordinal categories contribute their code unchanged. Cement grade is stored as
//! the raw grade (43 / 53) and is affine-mapped onto {0, 1} first. Changing any
//! rule here changes the meaning of every stored prediction.

use crate::domain::{QualityCategory, QualityRatings};

/// How a category's code becomes its contribution to the sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Contribute the code as-is.
    Ordinal,
    /// Contribute `(code - offset) / divisor`.
    Affine { offset: f64, divisor: f64 },
}

impl Normalization {
    pub fn apply(self, code: u8) -> f64 {
        let code = f64::from(code);
        match self {
            Normalization::Ordinal => code,
            Normalization::Affine { offset, divisor } => (code - offset) / divisor,
        }
    }
}

/// Divisor applied to the normalized sum.
const QUALITY_DIVISOR: f64 = 10.0;

/// Normalization rule per category.
///
/// Exhaustive over `QualityCategory`: a new category does not compile until it
/// has a rule here.
pub const fn rule_for(category: QualityCategory) -> Normalization {
    match category {
        QualityCategory::CementGrade => Normalization::Affine {
            offset: 43.0,
            divisor: 10.0,
        },
        QualityCategory::Wood
        | QualityCategory::SteelGrade
        | QualityCategory::BrickType
        | QualityCategory::Flooring
        | QualityCategory::Paint
        | QualityCategory::Plumbing
        | QualityCategory::Electrical
        | QualityCategory::Roofing
        | QualityCategory::WindowGlass => Normalization::Ordinal,
    }
}

/// Composite quality of one property.
pub fn total_quality(ratings: &QualityRatings) -> f64 {
    let sum: f64 = ratings
        .codes()
        .iter()
        .map(|&(category, code)| rule_for(category).apply(code))
        .sum();
    sum / QUALITY_DIVISOR
}
