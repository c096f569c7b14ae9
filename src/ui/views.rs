use std::io::{self, Write};

use image::Rgb;

use crate::classify::{Classification, WasteLabel};
use crate::color::hex;
use crate::data::model::Table;
use crate::ui::upload::ImagePreview;

// ---------------------------------------------------------------------------
// Text views written to the session output
// ---------------------------------------------------------------------------

/// Print rows as an aligned two-column table.
pub fn write_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(out, "(no matching rows)");
    }
    let width = table
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    writeln!(out, "{:<width$}  {:>8}", "Category", "Count")?;
    for row in table {
        writeln!(out, "{:<width$}  {:>8}", row.category, row.count)?;
    }
    writeln!(out, "({} rows, {} items)", table.len(), table.total())
}

pub fn write_preview<W: Write>(
    out: &mut W,
    file_name: &str,
    preview: Option<ImagePreview>,
) -> io::Result<()> {
    match preview {
        Some(p) => writeln!(
            out,
            "Uploaded {file_name}: {} image, {}x{} pixels",
            p.format, p.width, p.height
        ),
        None => writeln!(out, "Uploaded {file_name} (no image preview available)"),
    }
}

pub fn write_classification<W: Write>(
    out: &mut W,
    result: &Classification,
    scores: &[(WasteLabel, u32)],
) -> io::Result<()> {
    let breakdown: Vec<String> = scores
        .iter()
        .map(|(label, score)| format!("{label}={score}"))
        .collect();
    writeln!(out, "Keyword scores: {}", breakdown.join(", "))?;
    if result.is_confident() {
        writeln!(
            out,
            "Predicted category: {} (confidence {})",
            result.label_text(),
            result.score
        )
    } else {
        writeln!(out, "Predicted category: {}", result.label_text())
    }
}

pub fn write_legend<W: Write>(out: &mut W, legend: &[(String, Rgb<u8>)]) -> io::Result<()> {
    writeln!(out, "Legend:")?;
    for (category, color) in legend {
        writeln!(out, "  {} {category}", hex(*color))?;
    }
    Ok(())
}
