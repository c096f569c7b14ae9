use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Row – one (category, count) observation
// ---------------------------------------------------------------------------

/// A single observation of the dataset.
///
/// Field names follow the `Category,Count` header of the source CSV so the
/// same type can be read with `csv`/`serde_json` and written back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

impl Row {
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.count)
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset (or a filtered view of it)
// ---------------------------------------------------------------------------

/// Ordered rows, insertion order = source order.
///
/// A `Table` is never modified after construction; filtering produces a new
/// one. Categories may repeat, in which case the aggregator treats the rows
/// as separate observations of the same category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Grand total of all counts.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.category.as_str()) {
                seen.push(&row.category);
            }
        }
        seen
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
