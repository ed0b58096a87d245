//! CSV ingest and validation.
//!
//! This module turns a listing CSV into validated `Listing`s that are safe to
//! hand to the prediction pipeline. It is the caller-side gate: anything the
//! pipeline would choke on (non-numeric cells, unknown codes, zero area,
//! negative distances) is rejected here, per row.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (rows keep file order)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{
    AreaType, BrickType, CementGrade, ElectricalQuality, FlooringQuality, Listing, PaintQuality, PlumbingQuality,
    PropertyAttributes, QualityCategory, QualityRatings, RoofingType, SteelGrade, WindowGlassQuality, WoodQuality,
};
use crate::error::AppError;

/// Columns every listing file must carry.
pub const REQUIRED_COLUMNS: [&str; 21] = [
    "id",
    "area_sqft",
    "built_year",
    "atm_km",
    "hospital_km",
    "school_km",
    "bedrooms",
    "bathrooms",
    "balconies",
    "floors",
    "wood",
    "cement_grade",
    "steel_grade",
    "brick_type",
    "flooring",
    "paint",
    "plumbing",
    "electrical",
    "roofing",
    "window_glass",
    "area_type",
];

/// Optional asking-price column.
pub const PRICE_COLUMN: &str = "price";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: validated listings + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub listings: Vec<Listing>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Whether rows must carry an asking price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    Optional,
    Required,
}

/// Load and validate listings from a CSV file.
pub fn load_listings(path: &Path, price: PriceColumn) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = read_listings(file, price)?;
    debug!(
        path = %path.display(),
        rows_read = data.rows_read,
        rows_used = data.rows_used,
        "listings ingested"
    );
    Ok(data)
}

/// Load and validate listings from any CSV source.
pub fn read_listings<R: Read>(source: R, price: PriceColumn) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map, price)?;

    let mut listings = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, "id").map(str::to_string);
        match parse_listing(&record, &header_map, price) {
            Ok(listing) => listings.push(listing),
            Err(message) => {
                warn!(line, id = id.as_deref().unwrap_or(""), %message, "skipping listing row");
                row_errors.push(RowError { line, id, message });
            }
        }
    }

    let rows_used = listings.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid listing rows remain after validation."));
    }

    Ok(IngestedData {
        listings,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>, price: PriceColumn) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            2,
            format!("Missing required column(s): {}", missing.iter().map(|c| format!("`{c}`")).collect::<Vec<_>>().join(", ")),
        ));
    }
    if price == PriceColumn::Required && !header_map.contains_key(PRICE_COLUMN) {
        return Err(AppError::new(2, "Training data requires a `price` column."));
    }
    Ok(())
}

fn parse_listing(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    price: PriceColumn,
) -> Result<Listing, String> {
    let id = get_required(record, header_map, "id")?.to_string();

    let quality = QualityRatings {
        wood: parse_code::<WoodQuality>(record, header_map, QualityCategory::Wood.column())?,
        cement_grade: parse_code::<CementGrade>(record, header_map, QualityCategory::CementGrade.column())?,
        steel_grade: parse_code::<SteelGrade>(record, header_map, QualityCategory::SteelGrade.column())?,
        brick_type: parse_code::<BrickType>(record, header_map, QualityCategory::BrickType.column())?,
        flooring: parse_code::<FlooringQuality>(record, header_map, QualityCategory::Flooring.column())?,
        paint: parse_code::<PaintQuality>(record, header_map, QualityCategory::Paint.column())?,
        plumbing: parse_code::<PlumbingQuality>(record, header_map, QualityCategory::Plumbing.column())?,
        electrical: parse_code::<ElectricalQuality>(record, header_map, QualityCategory::Electrical.column())?,
        roofing: parse_code::<RoofingType>(record, header_map, QualityCategory::Roofing.column())?,
        window_glass: parse_code::<WindowGlassQuality>(record, header_map, QualityCategory::WindowGlass.column())?,
    };

    let attributes = PropertyAttributes {
        area_sqft: parse_f64(record, header_map, "area_sqft")?,
        built_year: parse_int(record, header_map, "built_year")?,
        atm_km: parse_f64(record, header_map, "atm_km")?,
        hospital_km: parse_f64(record, header_map, "hospital_km")?,
        school_km: parse_f64(record, header_map, "school_km")?,
        bedrooms: parse_int(record, header_map, "bedrooms")?,
        bathrooms: parse_int(record, header_map, "bathrooms")?,
        balconies: parse_int(record, header_map, "balconies")?,
        floors: parse_int(record, header_map, "floors")?,
        quality,
        area_type: parse_code::<AreaType>(record, header_map, "area_type")?,
    };

    attributes.validate().map_err(|e| e.to_string())?;

    let listed_price = match get_optional(record, header_map, PRICE_COLUMN) {
        Some(raw) => {
            let v = raw
                .parse::<f64>()
                .map_err(|_| format!("Invalid `price` value '{raw}'."))?;
            if !v.is_finite() || v <= 0.0 {
                return Err(format!("`price` must be > 0, got {raw}."));
            }
            Some(v)
        }
        None if price == PriceColumn::Required => return Err("Missing required value: `price`".to_string()),
        None => None,
    };

    Ok(Listing {
        id,
        attributes,
        listed_price,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let raw = get_required(record, header_map, name)?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{raw}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite `{name}` value '{raw}'."))
    }
}

fn parse_int<T: std::str::FromStr>(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<T, String> {
    let raw = get_required(record, header_map, name)?;
    raw.parse::<T>()
        .map_err(|_| format!("Invalid `{name}` value '{raw}'."))
}

fn parse_code<T: TryFrom<u8, Error = String>>(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<T, String> {
    let code: u8 = parse_int(record, header_map, name)?;
    T::try_from(code)
}
