//! Model training.
//!
//! Responsibilities:
//!
//! - turn labelled listings into a design matrix via the prediction pipeline
//! - solve least squares for the linear price model
//! - attach fit diagnostics to the saved artifact

pub mod trainer;

pub use trainer::*;
