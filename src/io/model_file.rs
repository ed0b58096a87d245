//! Read/write model JSON files.
//!
//! The model JSON is the portable artifact produced by `fairprice train` and
//! consumed by every prediction call site:
//! - model kind + parameters (intercept and coefficients)
//! - the feature layout it was trained against
//! - fit diagnostics and training date
//!
//! The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::ModelFile;
use crate::error::AppError;

/// Write a model JSON file.
pub fn write_model_file(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file.
pub fn read_model_file(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid model JSON '{}': {e}", path.display())))?;
    Ok(model)
}
