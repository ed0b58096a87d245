//! CSV exports, written through `csv::Writer` so ids are quoted as needed.
//!
//! - per-listing predictions (full model precision; rounding is a display concern)
//! - listings in the ingest schema (so generated samples can be fed back in)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Listing, PricedListing};
use crate::error::AppError;
use crate::io::ingest::{PRICE_COLUMN, REQUIRED_COLUMNS};

/// Write per-listing predictions to a CSV file.
pub fn write_predictions_csv(path: &Path, priced: &[PricedListing]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_predictions(file, priced)
}

/// Write per-listing predictions to any sink.
pub fn write_predictions<W: Write>(out: W, priced: &[PricedListing]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["id", "predicted_price", "status", "listed_price"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in priced {
        let (predicted, status) = match &p.prediction {
            Ok(price) => (format!("{price:.4}"), "ok"),
            Err(e) => (String::new(), e.status_label()),
        };
        let listed = p.listing.listed_price.map(|v| format!("{v:.2}")).unwrap_or_default();
        writer
            .write_record([p.listing.id.as_str(), predicted.as_str(), status, listed.as_str()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write listings in the ingest schema (plus `price` when any listing has one).
pub fn write_listings<W: Write>(out: W, listings: &[Listing]) -> Result<(), AppError> {
    let with_price = listings.iter().any(|l| l.listed_price.is_some());
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    if with_price {
        header.push(PRICE_COLUMN);
    }
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write listing CSV header: {e}")))?;

    for l in listings {
        let a = &l.attributes;
        let mut row = vec![
            l.id.clone(),
            a.area_sqft.to_string(),
            a.built_year.to_string(),
            a.atm_km.to_string(),
            a.hospital_km.to_string(),
            a.school_km.to_string(),
            a.bedrooms.to_string(),
            a.bathrooms.to_string(),
            a.balconies.to_string(),
            a.floors.to_string(),
        ];
        row.extend(a.quality.codes().iter().map(|(_, c)| c.to_string()));
        row.push(a.area_type.code().to_string());
        if with_price {
            row.push(l.listed_price.map(|v| format!("{v:.2}")).unwrap_or_default());
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write listing CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush listing CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::typical_attributes;
    use crate::domain::{AreaType, PropertyAttributes, QualityRatings};
    use crate::error::PredictError;
    use crate::io::ingest::{PriceColumn, read_listings};

    #[test]
    fn absent_predictions_export_blank_with_status() {
        let priced = vec![
            PricedListing {
                listing: Listing {
                    id: "A".to_string(),
                    attributes: typical_attributes(),
                    listed_price: Some(5_000_000.0),
                },
                prediction: Ok(4_812_345.678_91),
            },
            PricedListing {
                listing: Listing {
                    id: "B".to_string(),
                    attributes: typical_attributes(),
                    listed_price: None,
                },
                prediction: Err(PredictError::ModelUnavailable {
                    reason: "missing".to_string(),
                }),
            },
        ];

        let mut buf = Vec::new();
        write_predictions(&mut buf, &priced).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,predicted_price,status,listed_price");
        assert_eq!(lines[1], "A,4812345.6789,ok,5000000.00");
        assert_eq!(lines[2], "B,,model_unavailable,");
    }

    #[test]
    fn written_listings_read_back_through_ingest() {
        let listings = vec![
            Listing {
                id: "S-001".to_string(),
                attributes: typical_attributes(),
                listed_price: Some(3_250_000.0),
            },
            Listing {
                id: "S-002".to_string(),
                attributes: roomy_attributes(),
                listed_price: None,
            },
        ];

        let mut buf = Vec::new();
        write_listings(&mut buf, &listings).unwrap();
        let data = read_listings(buf.as_slice(), PriceColumn::Optional).unwrap();

        assert_eq!(data.rows_used, 2);
        assert_eq!(data.listings, listings);
    }

    #[test]
    fn ids_with_commas_and_quotes_are_quoted() {
        let listings = vec![Listing {
            id: "Flat 2, Block \"A\"".to_string(),
            attributes: typical_attributes(),
            listed_price: Some(4_100_000.0),
        }];

        let mut buf = Vec::new();
        write_listings(&mut buf, &listings).unwrap();
        let data = read_listings(buf.as_slice(), PriceColumn::Optional).unwrap();
        assert_eq!(data.listings, listings);

        let priced = vec![PricedListing {
            listing: listings[0].clone(),
            prediction: Ok(3_900_000.0),
        }];
        let mut buf = Vec::new();
        write_predictions(&mut buf, &priced).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("\"Flat 2, Block \"\"A\"\"\",3900000.0000,ok,4100000.00")
        );
    }

    fn roomy_attributes() -> PropertyAttributes {
        PropertyAttributes {
            area_sqft: 2875.5,
            bedrooms: 5,
            quality: QualityRatings::highest(),
            area_type: AreaType::Plot,
            ..typical_attributes()
        }
    }
}
