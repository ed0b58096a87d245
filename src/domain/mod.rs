//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - quality / category codes (`WoodQuality`, `CementGrade`, ..., `AreaType`)
//! - the pipeline input (`PropertyAttributes`) and listing wrappers
//! - per-command run configuration (`PredictConfig`, `TrainConfig`, `SampleConfig`)

pub mod quality;
pub mod types;

pub use quality::*;
pub use types::*;
