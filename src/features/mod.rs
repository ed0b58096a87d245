//! Feature engineering: raw property attributes -> model input.
//!
//! - `normalizer`: fixed calibration ranges, clamp + scale
//! - `quality`: composite quality score
//! - `vector`: ordered feature vector assembly

pub mod normalizer;
pub mod quality;
pub mod vector;

pub use normalizer::*;
pub use quality::*;
pub use vector::*;
