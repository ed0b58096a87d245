//! `fair-price` library crate.
//!
//! The binary (`fairprice`) is a thin wrapper around this library so that:
//!
//! - every call site (listing view, add-property form, dashboards, CLI) shares
//!   one prediction pipeline
//! - core logic is testable without spawning processes
//!
//! Pipeline: `PropertyAttributes` -> `features` -> `models::Regressor` -> price.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod predict;
pub mod report;
