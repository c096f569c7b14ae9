/// End-to-end tests of an interactive session.
///
/// A scripted stdin drives `ExplorerApp::run` through every menu entry
/// while reports, statistics and charts are written into a temporary
/// directory, so the whole path from typed input to emitted files runs
/// without mocking.
use std::io::Cursor;
use std::path::Path;

use ewaste_explorer::app::ExplorerApp;
use ewaste_explorer::classify::{classify, WasteLabel};
use ewaste_explorer::config::{Settings, DEFAULT_STATS_NAME};
use ewaste_explorer::data::aggregate::category_counts;
use ewaste_explorer::data::filter::{filter, RowFilter};
use ewaste_explorer::data::loader::{load_embedded, load_file};
use ewaste_explorer::data::model::{Row, Table};
use ewaste_explorer::report::build_report;
use ewaste_explorer::state::AppState;
use image::{Rgb, RgbImage};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn run_session(dataset: Table, settings: Settings, script: &str) -> (ExplorerApp, String) {
    let mut app = ExplorerApp::new(AppState::new(dataset, settings));
    let mut out = Vec::new();
    app.run(Cursor::new(script.to_string()), &mut out).unwrap();
    (app, String::from_utf8(out).unwrap())
}

fn write_png(path: &Path) {
    RgbImage::from_pixel(16, 9, Rgb([10, 20, 30])).save(path).unwrap();
}

// ── Dataset scenarios ────────────────────────────────────────────────────────

#[test]
fn canonical_dataset_scenarios() {
    let table = load_embedded().unwrap();

    let dist = category_counts(&table);
    let counts: Vec<(&str, u64)> = dist.iter().collect();
    assert_eq!(
        counts,
        vec![
            ("Electronics", 100),
            ("Cables", 75),
            ("Batteries", 50),
            ("Appliances", 30)
        ]
    );

    assert_eq!(
        filter(&table, Some("Cables"), None).rows(),
        &[Row::new("Cables", 75)]
    );
    assert_eq!(
        filter(&table, None, Some(60)).rows(),
        &[Row::new("Electronics", 100), Row::new("Cables", 75)]
    );

    let report = build_report(&table);
    assert!(report.document.contains("Total items: 255"));
    assert!(report.document.contains("Total categories: 4"));

    assert_eq!(classify("photo.jpg").label, None);
    assert_eq!(classify("photo.jpg").score, 0);
    assert_eq!(
        classify("old_li-ion_battery.jpg").label,
        Some(WasteLabel::Battery)
    );
}

// ── Full sessions ────────────────────────────────────────────────────────────

#[test]
fn session_writes_report_statistics_and_charts() {
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::in_dir(dir.path());
    settings.stats_json_path = Some(dir.path().join(DEFAULT_STATS_NAME));

    let (_, out) = run_session(load_embedded().unwrap(), settings.clone(), "4\n5\n7\n");

    let report = std::fs::read_to_string(&settings.report_path).unwrap();
    assert!(report.contains("Total items: 255"));
    assert!(report.contains("1. Electronics: 100"));
    assert!(out.contains("Report saved to"));
    assert!(out.contains("Category statistics:"));

    let stats: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(DEFAULT_STATS_NAME)).unwrap(),
    )
    .unwrap();
    assert_eq!(stats["Batteries"]["count"], 1);

    let chart = image::open(&settings.chart_path).unwrap();
    assert_eq!((chart.width(), chart.height()), (800, 600));
    assert!(out.contains("Charts saved to"));
    assert!(out.contains("Legend:"));
}

#[test]
fn unwritable_output_does_not_end_the_session() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::in_dir(dir.path().join("missing"));

    let (_, out) = run_session(load_embedded().unwrap(), settings, "4\n5\n1\n7\n");
    assert!(out.contains("Could not save the report"));
    assert!(out.contains("Could not save the charts"));
    assert!(out.contains("(4 rows, 255 items)"));
}

#[test]
fn upload_is_classified_by_name_and_filters_by_label() {
    let dir = TempDir::new().unwrap();
    let upload = dir.path().join("old_cable_wire.png");
    write_png(&upload);

    let dataset = Table::from_rows(vec![
        Row::new("Cable", 12),
        Row::new("Electronics", 100),
    ]);
    let script = format!("6\n{}\n7\n", upload.display());
    let (app, out) = run_session(dataset, Settings::in_dir(dir.path()), &script);

    assert!(out.contains("Uploaded old_cable_wire.png: PNG image, 16x9 pixels"));
    assert!(out.contains("Predicted category: Cable (confidence 2)"));
    assert!(out.contains("Rows for category 'Cable':"));
    assert_eq!(app.state.view.rows(), &[Row::new("Cable", 12)]);
}

#[test]
fn label_without_matching_rows_gives_empty_view() {
    let dir = TempDir::new().unwrap();
    let upload = dir.path().join("dead_battery.png");
    write_png(&upload);

    let script = format!("6\n{}\n7\n", upload.display());
    let (app, out) = run_session(
        load_embedded().unwrap(),
        Settings::in_dir(dir.path()),
        &script,
    );

    // The built-in dataset uses plural category names.
    assert!(out.contains("Predicted category: Battery"));
    assert!(out.contains("(no matching rows)"));
    assert!(app.state.view.is_empty());
    assert_eq!(app.state.dataset.len(), 4);
}

#[test]
fn non_image_upload_is_still_classified() {
    let dir = TempDir::new().unwrap();
    let upload = dir.path().join("photo.jpg");
    std::fs::write(&upload, b"plain text").unwrap();

    let script = format!("6\n{}\n7\n", upload.display());
    let (app, out) = run_session(
        load_embedded().unwrap(),
        Settings::in_dir(dir.path()),
        &script,
    );

    assert!(out.contains("no image preview available"));
    assert!(out.contains("Predicted category: no confident match"));
    assert_eq!(app.state.filter, RowFilter::all());
}

#[test]
fn file_dataset_with_repeated_categories_is_aggregated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sites.csv");
    std::fs::write(
        &path,
        "Category,Count\nCables,10\nBatteries,40\nCables,35\nAppliances,0\n",
    )
    .unwrap();

    let table = load_file(&path).unwrap();
    let dist = category_counts(&table);
    assert_eq!(dist.get("Cables"), Some(45));
    assert_eq!(dist.entries()[0].0, "Cables");

    let (_, out) = run_session(table, Settings::in_dir(dir.path()), "3\n0\n3\n36\n7\n");
    // A zero threshold keeps the zero-count row; 36 keeps only Batteries.
    assert!(out.contains("(4 rows, 85 items)"));
    assert!(out.contains("(1 rows, 40 items)"));
}
