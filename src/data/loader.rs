use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Row, Table};

/// The dataset shipped with the tool.
pub const EMBEDDED_DATASET: &str = "\
Category,Count
Electronics,100
Batteries,50
Cables,75
Appliances,30
";

const CATEGORY_COLUMN: &str = "Category";
const COUNT_COLUMN: &str = "Count";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dataset is rejected at load time.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: missing value for '{column}'")]
    MissingField { row: usize, column: &'static str },

    #[error("row {row}: count '{value}' is not a non-negative integer")]
    InvalidCount { row: usize, value: String },

    #[error("row {row}: category is empty")]
    EmptyCategory { row: usize },

    #[error("counts add up to more than {}", u64::MAX)]
    TotalOverflow,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse the built-in dataset.
pub fn load_embedded() -> Result<Table, DatasetError> {
    parse_csv(EMBEDDED_DATASET)
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header `Category,Count`, one row per observation
/// * `.json` – `[{ "Category": "Cables", "Count": 75 }, ...]`
pub fn load_file(path: &Path) -> Result<Table, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = match ext.as_str() {
        "csv" => parse_csv(&text)?,
        "json" => parse_json(&text)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string())),
    };
    log::info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a `Category,Count` header.
///
/// Columns are located by name, so extra columns and a different column
/// order are accepted. Surrounding whitespace in fields is ignored.
pub fn parse_csv(text: &str) -> Result<Table, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let category_idx = headers
        .iter()
        .position(|h| h == CATEGORY_COLUMN)
        .ok_or(DatasetError::MissingColumn(CATEGORY_COLUMN))?;
    let count_idx = headers
        .iter()
        .position(|h| h == COUNT_COLUMN)
        .ok_or(DatasetError::MissingColumn(COUNT_COLUMN))?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row_no = i + 1;

        let category = match record.get(category_idx) {
            Some(c) => c,
            None => {
                return Err(DatasetError::MissingField {
                    row: row_no,
                    column: CATEGORY_COLUMN,
                })
            }
        };
        let count = match record.get(count_idx) {
            Some(c) if !c.is_empty() => c,
            _ => {
                return Err(DatasetError::MissingField {
                    row: row_no,
                    column: COUNT_COLUMN,
                })
            }
        };

        rows.push(make_row(row_no, category, count)?);
    }

    checked_table(rows)
}

fn make_row(row: usize, category: &str, count: &str) -> Result<Row, DatasetError> {
    if category.is_empty() {
        return Err(DatasetError::EmptyCategory { row });
    }
    let count = count
        .parse::<u64>()
        .map_err(|_| DatasetError::InvalidCount {
            row,
            value: count.to_string(),
        })?;
    Ok(Row::new(category, count))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array of rows.
///
/// Counts must be JSON integers ≥ 0; `serde_json` rejects floats, strings and
/// negative numbers for the `u64` field.
pub fn parse_json(text: &str) -> Result<Table, DatasetError> {
    let rows: Vec<Row> = serde_json::from_str(text)?;
    if let Some(i) = rows.iter().position(|r| r.category.trim().is_empty()) {
        return Err(DatasetError::EmptyCategory { row: i + 1 });
    }
    checked_table(rows)
}

/// Every sum taken over a table is bounded by its grand total, so a table
/// whose total fits in a `u64` never overflows downstream.
fn checked_table(rows: Vec<Row>) -> Result<Table, DatasetError> {
    rows.iter()
        .try_fold(0u64, |acc, r| acc.checked_add(r.count))
        .ok_or(DatasetError::TotalOverflow)?;
    Ok(Table::from_rows(rows))
}
