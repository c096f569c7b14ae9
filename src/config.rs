use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_REPORT_NAME: &str = "ewaste_report.txt";
pub const DEFAULT_CHART_NAME: &str = "ewaste_charts.png";
pub const DEFAULT_STATS_NAME: &str = "ewaste_statistics.json";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Load the dataset from a CSV or JSON file instead of the built-in table
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Directory where reports and charts are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File name of the generated text report
    #[arg(long, default_value = DEFAULT_REPORT_NAME)]
    pub report_name: String,

    /// File name of the rendered chart image (PNG)
    #[arg(long, default_value = DEFAULT_CHART_NAME)]
    pub chart_name: String,

    /// Also write per-category statistics as JSON next to the report
    #[arg(long)]
    pub json_stats: bool,
}

/// Resolved output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
    pub stats_json_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            report_path: args.output_dir.join(&args.report_name),
            chart_path: args.output_dir.join(&args.chart_name),
            stats_json_path: args
                .json_stats
                .then(|| args.output_dir.join(DEFAULT_STATS_NAME)),
        }
    }

    /// Default names inside `dir`, without the JSON sidecar.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            report_path: dir.join(DEFAULT_REPORT_NAME),
            chart_path: dir.join(DEFAULT_CHART_NAME),
            stats_json_path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
