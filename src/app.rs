//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - resolves environment-backed settings (model path)
//! - runs the command pipeline
//! - prints reports and writes optional exports

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::cli::{Command, FeaturesArgs, PredictArgs, SampleArgs, TrainArgs};
use crate::domain::{PredictConfig, SampleConfig, TrainConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the model artifact.
pub const MODEL_ENV: &str = "FAIRPRICE_MODEL";

/// Model path used when neither `--model` nor `FAIRPRICE_MODEL` is set.
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Entry point for the `fairprice` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Features(args) => handle_features(args),
        Command::Train(args) => handle_train(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = predict_config_from_args(&args);
    let run = pipeline::run_predict(&config)?;

    print!("{}", crate::report::format_ingest_summary(&run.ingest));
    if !run.model_loaded {
        println!("Price model unavailable ({}); fair prices shown as N/A.", config.model_path.display());
    }
    println!();
    print!("{}", crate::report::format_prediction_table(&run.priced, &config.currency_symbol));
    Ok(())
}

#[derive(Serialize)]
struct FeatureRow<'a> {
    id: &'a str,
    features: Vec<(&'static str, f64)>,
}

fn handle_features(args: FeaturesArgs) -> Result<(), AppError> {
    let (ingest, vectors) = pipeline::run_features(&args.input)?;

    if args.json {
        for (id, v) in &vectors {
            let row = FeatureRow {
                id,
                features: v.named().collect(),
            };
            let line = serde_json::to_string(&row)
                .map_err(|e| AppError::new(4, format!("Failed to serialize features: {e}")))?;
            println!("{line}");
        }
        return Ok(());
    }

    print!("{}", crate::report::format_ingest_summary(&ingest));
    for (id, v) in &vectors {
        print!("{}", crate::report::format_feature_vector(id, v));
    }
    Ok(())
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let config = TrainConfig {
        csv_path: args.input,
        output_path: args.out,
    };
    let run = pipeline::run_train(&config)?;

    print!("{}", crate::report::format_ingest_summary(&run.ingest));
    print!("{}", crate::report::format_training_summary(&run.model, &args.currency));
    println!("Model written to {}", config.output_path.display());
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        count: args.count,
        seed: args.seed,
        output_path: args.out,
    };
    let listings = pipeline::run_sample(&config)?;

    match &config.output_path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
            crate::io::export::write_listings(file, &listings)?;
            tracing::info!(path = %path.display(), count = listings.len(), "sample written");
        }
        None => crate::io::export::write_listings(std::io::stdout().lock(), &listings)?,
    }
    Ok(())
}

pub fn predict_config_from_args(args: &PredictArgs) -> PredictConfig {
    PredictConfig {
        csv_path: args.input.clone(),
        model_path: resolve_model_path(args.model.clone()),
        export_path: args.export.clone(),
        currency_symbol: args.currency.clone(),
    }
}

/// `--model`, else `FAIRPRICE_MODEL` (from the environment or `.env`), else `model.json`.
pub fn resolve_model_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    dotenvy::dotenv().ok();
    std::env::var_os(MODEL_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}
