use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::Table;

// ---------------------------------------------------------------------------
// CategoryDistribution – category → summed count, most common first
// ---------------------------------------------------------------------------

/// Summed counts per category.
///
/// Entries are ordered by descending count; equal counts keep the order in
/// which their category was first seen in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDistribution {
    entries: Vec<(String, u64)>,
}

impl CategoryDistribution {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), *n))
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

/// Group rows by category and sum their counts.
pub fn category_counts(table: &Table) -> CategoryDistribution {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, u64)> = Vec::new();

    for row in table {
        match index.get(row.category.as_str()) {
            Some(&i) => entries[i].1 += row.count,
            None => {
                index.insert(&row.category, entries.len());
                entries.push((row.category.clone(), row.count));
            }
        }
    }

    // Stable sort keeps first-seen order among equal totals.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    CategoryDistribution { entries }
}

// ---------------------------------------------------------------------------
// CategoryStatistics – descriptive statistics of one category's counts
// ---------------------------------------------------------------------------

/// Summary of the count values observed for one category.
///
/// `std` is the sample standard deviation and is NaN for a single
/// observation. `serde_json` writes NaN as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStatistics {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q1: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q3: f64,
    pub max: f64,
}

impl CategoryStatistics {
    /// Compute statistics over `values`. Returns `None` when empty.
    pub fn from_values(values: &[u64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        Some(Self {
            count: n,
            mean,
            std,
            min: sorted[0],
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
            max: sorted[n - 1],
        })
    }
}

/// Per-category statistics keyed by category name.
pub type StatisticsTable = BTreeMap<String, CategoryStatistics>;

/// Group rows by category and describe each group's counts.
pub fn category_statistics(table: &Table) -> StatisticsTable {
    let mut groups: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for row in table {
        groups.entry(&row.category).or_default().push(row.count);
    }

    groups
        .into_iter()
        .filter_map(|(category, values)| {
            CategoryStatistics::from_values(&values).map(|s| (category.to_string(), s))
        })
        .collect()
}

/// Percentile of sorted data using linear interpolation between order
/// statistics (`p` in 0..=100).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f64;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;

    if f == c || c >= sorted.len() {
        sorted[f.min(sorted.len() - 1)]
    } else {
        let d = k - f as f64;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}
