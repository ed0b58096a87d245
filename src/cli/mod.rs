//! Command-line parsing for the fair-price tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline code. Resolution of environment-backed settings happens in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fairprice", version, about = "Property fair-price predictor")]
pub struct Cli {
    /// Debug-level logging for this crate (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict fair prices for every listing in a CSV.
    Predict(PredictArgs),
    /// Print the model feature vector for every listing in a CSV.
    Features(FeaturesArgs),
    /// Train a linear price model from listings with a `price` column.
    Train(TrainArgs),
    /// Write a synthetic listing CSV.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Listing CSV.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Model JSON (falls back to FAIRPRICE_MODEL, then `model.json`).
    #[arg(short, long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Export per-listing predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Currency symbol used for display.
    #[arg(long, default_value = "₹")]
    pub currency: String,
}

#[derive(Debug, Args, Clone)]
pub struct FeaturesArgs {
    /// Listing CSV.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Emit JSON (one object per listing) instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    /// Labelled listing CSV (must include `price`).
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Where to write the model JSON.
    #[arg(short, long, value_name = "JSON", default_value = "model.json")]
    pub out: PathBuf,

    /// Currency symbol used for display.
    #[arg(long, default_value = "₹")]
    pub currency: String,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Number of listings to generate.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV (stdout when omitted).
    #[arg(short, long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}
