use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::model::Table;
use crate::utils::error::{CleanError, Result};

pub const PRICE_COLUMN: &str = "price";
pub const REVIEW_COLUMN: &str = "last_review";

/// Formats accepted for `last_review`, tried in order. Output is always
/// rewritten as `%Y-%m-%d`, so cleaned data re-parses via the first entry.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Apply the two cleaning rules and return a new table:
/// keep rows with `min_price <= price <= max_price` (missing price drops the
/// row), then retype `last_review` to a canonical calendar date (unparsable
/// text becomes the missing marker, the row stays).
pub fn clean_table(table: &Table, min_price: f64, max_price: f64) -> Result<Table> {
    let price_idx =
        table
            .column_index(PRICE_COLUMN)
            .ok_or_else(|| CleanError::MissingColumnError {
                column: PRICE_COLUMN.to_string(),
            })?;
    let review_idx =
        table
            .column_index(REVIEW_COLUMN)
            .ok_or_else(|| CleanError::MissingColumnError {
                column: REVIEW_COLUMN.to_string(),
            })?;

    let mut cleaned = Table::new(table.headers().to_vec());

    for row in table.rows() {
        // Comparison against a missing price is false, so the row goes.
        // NaN fails both bounds the same way.
        let keep = match parse_price(&row[price_idx]) {
            Some(price) => min_price <= price && price <= max_price,
            None => false,
        };
        if !keep {
            continue;
        }

        let mut out = row.clone();
        out[review_idx] = match parse_review_date(&row[review_idx]) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => String::new(),
        };
        cleaned.push_row(out);
    }

    Ok(cleaned)
}

pub fn parse_price(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

pub fn parse_review_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    None
}
