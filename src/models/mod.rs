//! Price models: the `Regressor` capability, the bundled linear model, and the
//! load-once `ModelHandle`.

pub mod handle;
pub mod regressor;

pub use handle::*;
pub use regressor::*;
