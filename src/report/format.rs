//! Terminal formatting.
//!
//! Prices are rounded to whole currency units here and nowhere else.

use crate::domain::{ModelFile, PricedListing};
use crate::features::NormalizedFeatureVector;
use crate::io::ingest::IngestedData;

/// Display text for an absent prediction.
pub const NOT_AVAILABLE: &str = "N/A";

/// `₹4,812,346` style price, or `N/A`.
pub fn format_price(price: Option<f64>, currency_symbol: &str) -> String {
    match price {
        Some(v) if v.is_finite() => {
            let rounded = v.round();
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("{sign}{currency_symbol}{}", group_thousands(rounded.abs()))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rows read / used / skipped, plus the first few row errors.
pub fn format_ingest_summary(ingest: &IngestedData) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    for err in ingest.row_errors.iter().take(5) {
        out.push_str(&format!(
            "  line {}{}: {}\n",
            err.line,
            err.id.as_deref().map(|id| format!(" ({id})")).unwrap_or_default(),
            err.message
        ));
    }
    if ingest.row_errors.len() > 5 {
        out.push_str(&format!("  ... {} more\n", ingest.row_errors.len() - 5));
    }
    out
}

/// One line per listing: id, fair price, asking price.
pub fn format_prediction_table(priced: &[PricedListing], currency_symbol: &str) -> String {
    let id_width = priced
        .iter()
        .map(|p| p.listing.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut out = String::new();
    out.push_str(&format!("{:<id_width$}  {:>16}  {:>16}\n", "ID", "Fair price", "Listed"));
    for p in priced {
        let listed = p
            .listing
            .listed_price
            .map(|v| format_price(Some(v), currency_symbol))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<id_width$}  {:>16}  {:>16}\n",
            p.listing.id,
            format_price(p.price(), currency_symbol),
            listed
        ));
    }

    let available = priced.iter().filter(|p| p.prediction.is_ok()).count();
    out.push_str(&format!("\nPredicted: {available}/{}\n", priced.len()));
    out
}

/// Feature vector as `name = value` lines.
pub fn format_feature_vector(id: &str, vector: &NormalizedFeatureVector) -> String {
    let mut out = format!("[{id}]\n");
    for (name, value) in vector.named() {
        out.push_str(&format!("  {name:<26} {value:>10.6}\n"));
    }
    out
}

/// Summary of a freshly trained model.
pub fn format_training_summary(model: &ModelFile, currency_symbol: &str) -> String {
    let mut out = String::new();
    out.push_str("=== fairprice - linear price model ===\n");
    out.push_str(&format!("Trained on: {}\n", model.trained_on));
    out.push_str(&format!(
        "Fit: n={} | R2={:.4} | RMSE={}\n",
        model.quality.n,
        model.quality.r2,
        format_price(Some(model.quality.rmse), currency_symbol)
    ));
    out.push_str(&format!("Intercept: {:.2}\n", model.intercept));
    out.push_str("Coefficients:\n");
    for (name, c) in model.feature_names.iter().zip(&model.coefficients) {
        out.push_str(&format!("  {name:<26} {c:>16.2}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;
    use crate::domain::types::typical_attributes;
    use crate::error::PredictError;

    #[test]
    fn price_rounds_to_whole_units_for_display_only() {
        assert_eq!(format_price(Some(4_812_345.678), "₹"), "₹4,812,346");
        assert_eq!(format_price(Some(999.4), "$"), "$999");
        assert_eq!(format_price(Some(1000.0), "$"), "$1,000");
        assert_eq!(format_price(Some(0.2), "$"), "$0");
        assert_eq!(format_price(Some(-1234.0), "$"), "-$1,234");
    }

    #[test]
    fn absent_price_is_not_available_not_zero() {
        assert_eq!(format_price(None, "₹"), "N/A");
        assert_eq!(format_price(Some(f64::NAN), "₹"), "N/A");
    }

    #[test]
    fn prediction_table_shows_na_for_failures() {
        let priced = vec![
            PricedListing {
                listing: Listing {
                    id: "A-1".to_string(),
                    attributes: typical_attributes(),
                    listed_price: Some(3_100_000.0),
                },
                prediction: Ok(2_950_000.4),
            },
            PricedListing {
                listing: Listing {
                    id: "A-2".to_string(),
                    attributes: typical_attributes(),
                    listed_price: None,
                },
                prediction: Err(PredictError::ModelUnavailable {
                    reason: "missing".to_string(),
                }),
            },
        ];
        let table = format_prediction_table(&priced, "₹");
        assert!(table.contains("₹2,950,000"), "{table}");
        assert!(table.contains("₹3,100,000"), "{table}");
        assert!(table.lines().any(|l| l.starts_with("A-2") && l.contains("N/A")), "{table}");
        assert!(table.contains("Predicted: 1/2"), "{table}");
    }
}
