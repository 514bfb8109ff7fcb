use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::ReviewRecord;

/// Column headers the dataset must provide. Absence of any of these is a
/// fatal configuration error reported before any request is served.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Airline", "Route", "Class"];

/// Per-row columns that may be absent or empty without failing the load.
const OPTIONAL_COLUMNS: [&str; 3] = ["Type of Traveller", "Reviews", "Overall Rating"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load review records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the review columns (recommended)
/// * `.json` – `[{ "Airline": ..., "Route": ..., ...}, ...]`
pub fn load_file(path: &Path) -> Result<Vec<ReviewRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<ReviewRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| {
        column(name).with_context(|| format!("Dataset must contain column: {name}"))
    };
    let airline_idx = required(REQUIRED_COLUMNS[0])?;
    let route_idx = required(REQUIRED_COLUMNS[1])?;
    let class_idx = required(REQUIRED_COLUMNS[2])?;

    let traveller_idx = column(OPTIONAL_COLUMNS[0]);
    let reviews_idx = column(OPTIONAL_COLUMNS[1]);
    let rating_idx = column(OPTIONAL_COLUMNS[2]);

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        records.push(ReviewRecord {
            airline: cell(Some(airline_idx)),
            route_raw: cell(Some(route_idx)),
            class: cell(Some(class_idx)),
            traveller_type: cell(traveller_idx),
            review_text: cell(reviews_idx),
            overall_rating: parse_rating(&cell(rating_idx)),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Airline": "Qantas",
///     "Route": "Sydney to Singapore",
///     "Class": "Economy",
///     "Type of Traveller": "Solo Leisure",
///     "Reviews": "Friendly crew, decent food.",
///     "Overall Rating": 7.0
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<ReviewRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    // Fail fast on a missing required column before touching any row.
    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        for name in REQUIRED_COLUMNS {
            if !first.contains_key(name) {
                bail!("Dataset must contain column: {name}");
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let text_field = |name: &str| {
            obj.get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_string()
        };
        let rating = match obj.get("Overall Rating") {
            Some(JsonValue::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
            Some(JsonValue::String(s)) => parse_rating(s),
            _ => None,
        };

        records.push(ReviewRecord {
            airline: text_field("Airline"),
            route_raw: text_field("Route"),
            class: text_field("Class"),
            traveller_type: text_field("Type of Traveller"),
            review_text: text_field("Reviews"),
            overall_rating: rating,
        });
    }

    Ok(records)
}

/// Parse a rating cell; empty or non-finite input is treated as missing.
fn parse_rating(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn csv_rows_load_with_optional_fields() {
        let path = write_temp(
            "skyward_loader_ok.csv",
            "Airline,Route,Class,Type of Traveller,Reviews,Overall Rating\n\
             Qantas,Sydney to Singapore,Economy,Solo Leisure,Good wifi,7.5\n\
             KLM,Amsterdam to Rome,Business,,,\n",
        );
        let records = load_file(&path).expect("load should succeed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].airline, "Qantas");
        assert_eq!(records[0].overall_rating, Some(7.5));
        assert_eq!(records[1].review_text, "");
        assert_eq!(records[1].overall_rating, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let path = write_temp(
            "skyward_loader_missing.csv",
            "Airline,Class,Reviews\nQantas,Economy,fine\n",
        );
        let err = load_file(&path).expect_err("load should fail");
        assert!(err.to_string().contains("Route"), "got: {err:#}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("reviews.parquet")).expect_err("should fail");
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn json_records_load() {
        let path = write_temp(
            "skyward_loader_ok.json",
            r#"[{"Airline":"KLM","Route":"Amsterdam to Rome","Class":"Economy",
                 "Reviews":"ok","Overall Rating":"6"}]"#,
        );
        let records = load_file(&path).expect("load should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].overall_rating, Some(6.0));
    }

    #[test]
    fn non_finite_rating_is_missing() {
        assert_eq!(parse_rating("NaN"), None);
        assert_eq!(parse_rating("inf"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating(" 8.0 "), Some(8.0));
    }
}
