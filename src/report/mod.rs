//! Reporting utilities: price display and formatted terminal output.
//!
//! Formatting lives here so the pipeline stays presentation-free and output
//! changes stay localized.

pub mod format;

pub use format::*;
