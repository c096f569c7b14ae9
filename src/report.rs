use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::aggregate::{
    category_counts, category_statistics, CategoryDistribution, StatisticsTable,
};
use crate::data::model::Table;

pub const REPORT_TITLE: &str = "E-Waste Dataset Report";

/// A rendered report plus the statistics it was built from.
#[derive(Debug, Clone)]
pub struct Report {
    pub document: String,
    pub statistics: StatisticsTable,
}

/// Compose the text report for `table`.
///
/// Layout: title, distinct category count, grand total, the "most common
/// first" list of category totals, then the statistics table.
pub fn build_report(table: &Table) -> Report {
    let distribution = category_counts(table);
    let statistics = category_statistics(table);
    let document = Document {
        distribution: &distribution,
        total: table.total(),
        statistics: &statistics,
    }
    .to_string();

    Report {
        document,
        statistics,
    }
}

/// Render statistics as a fixed-width text table. NaN prints as `NaN`.
pub fn render_statistics(statistics: &StatisticsTable) -> String {
    StatisticsView(statistics).to_string()
}

struct Document<'a> {
    distribution: &'a CategoryDistribution,
    total: u64,
    statistics: &'a StatisticsTable,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_TITLE}")?;
        writeln!(f, "{}", "=".repeat(REPORT_TITLE.len()))?;
        writeln!(f, "Total categories: {}", self.distribution.len())?;
        writeln!(f, "Total items: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "Items per category:")?;
        for (i, (category, count)) in self.distribution.iter().enumerate() {
            writeln!(f, "{}. {category}: {count}", i + 1)?;
        }
        writeln!(f)?;
        writeln!(f, "Category statistics:")?;
        write!(f, "{}", StatisticsView(self.statistics))
    }
}

struct StatisticsView<'a>(&'a StatisticsTable);

impl fmt::Display for StatisticsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statistics = self.0;
        let width = statistics
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0)
            .max("category".len());

        writeln!(
            f,
            "{:<width$} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "category", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        if statistics.is_empty() {
            return writeln!(f, "(no rows)");
        }
        for (category, s) in statistics {
            writeln!(
                f,
                "{:<width$} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                category, s.count, s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max
            )?;
        }
        Ok(())
    }
}

/// Write the report document to `path`.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    std::fs::write(path, &report.document)
        .with_context(|| format!("writing report to {}", path.display()))?;
    log::info!("report written to {}", path.display());
    Ok(())
}

/// Write the statistics as pretty JSON to `path`.
pub fn write_statistics_json(statistics: &StatisticsTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(statistics).context("serializing statistics")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing statistics to {}", path.display()))?;
    log::info!("statistics written to {}", path.display());
    Ok(())
}
