use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use crate::color::CategoryColors;
use crate::data::aggregate::{
    category_counts, category_statistics, CategoryDistribution, StatisticsTable,
};
use crate::data::model::Table;
use crate::ui::canvas::{draw_line, draw_rect_outline, fill_circle, fill_rect, fill_sector};

pub const PANEL_WIDTH: u32 = 400;
pub const PANEL_HEIGHT: u32 = 300;
const MARGIN: i32 = 30;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const FRAME: Rgb<u8> = Rgb([200, 200, 200]);

// ---------------------------------------------------------------------------
// Dashboard layout
// ---------------------------------------------------------------------------

/// Views drawn on the dashboard, in row-major panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Box,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Box,
        ChartKind::Scatter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar: items per category",
            ChartKind::Pie => "pie: share of items",
            ChartKind::Box => "box: count distribution per category",
            ChartKind::Scatter => "scatter: count per row",
        }
    }
}

/// A rendered dashboard image with the colour legend used to draw it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub image: RgbImage,
    pub legend: Vec<(String, Rgb<u8>)>,
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Panel {
    fn left(&self) -> i32 {
        self.x + MARGIN
    }

    fn right(&self) -> i32 {
        self.x + self.width as i32 - MARGIN
    }

    fn top(&self) -> i32 {
        self.y + MARGIN
    }

    fn bottom(&self) -> i32 {
        self.y + self.height as i32 - MARGIN
    }

    fn plot_width(&self) -> i32 {
        (self.right() - self.left()).max(1)
    }

    fn plot_height(&self) -> i32 {
        (self.bottom() - self.top()).max(1)
    }

    /// Screen y of `value` on a 0..=`max` vertical scale.
    fn y_for(&self, value: f64, max: f64) -> i32 {
        if max <= 0.0 {
            return self.bottom();
        }
        self.bottom() - ((value / max) * self.plot_height() as f64).round() as i32
    }

    fn draw_frame(&self, img: &mut RgbImage) {
        draw_rect_outline(img, self.x, self.y, self.width, self.height, FRAME);
    }

    fn draw_axes(&self, img: &mut RgbImage) {
        draw_line(img, self.left(), self.top(), self.left(), self.bottom(), AXIS);
        draw_line(img, self.left(), self.bottom(), self.right(), self.bottom(), AXIS);
    }
}

/// Render bar, pie, box and scatter views of `table` into one 2x2 image.
pub fn render_dashboard(table: &Table) -> Dashboard {
    let distribution = category_counts(table);
    let statistics = category_statistics(table);
    let colors = CategoryColors::new(distribution.iter().map(|(c, _)| c));

    let mut img = RgbImage::from_pixel(PANEL_WIDTH * 2, PANEL_HEIGHT * 2, BACKGROUND);

    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        let panel = Panel {
            x: (i as u32 % 2 * PANEL_WIDTH) as i32,
            y: (i as u32 / 2 * PANEL_HEIGHT) as i32,
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
        };
        panel.draw_frame(&mut img);
        match kind {
            ChartKind::Bar => draw_bars(&mut img, panel, &distribution, &colors),
            ChartKind::Pie => draw_pie(&mut img, panel, &distribution, &colors),
            ChartKind::Box => draw_boxes(&mut img, panel, &statistics, &colors),
            ChartKind::Scatter => draw_scatter(&mut img, panel, table, &colors),
        }
    }

    Dashboard {
        image: img,
        legend: colors.legend_entries(),
    }
}

/// Save the dashboard as an image; the format follows the file extension.
pub fn save_dashboard(dashboard: &Dashboard, path: &Path) -> Result<()> {
    dashboard
        .image
        .save(path)
        .with_context(|| format!("saving chart image to {}", path.display()))?;
    log::info!("charts written to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual views
// ---------------------------------------------------------------------------

fn draw_bars(
    img: &mut RgbImage,
    panel: Panel,
    distribution: &CategoryDistribution,
    colors: &CategoryColors,
) {
    panel.draw_axes(img);
    let n = distribution.len() as i32;
    let max = distribution.iter().map(|(_, v)| v).max().unwrap_or(0) as f64;
    if n == 0 || max <= 0.0 {
        return;
    }

    let slot = panel.plot_width() / n;
    let bar_width = (slot * 3 / 5).max(1);
    for (i, (category, value)) in distribution.iter().enumerate() {
        let x = panel.left() + slot * i as i32 + (slot - bar_width) / 2;
        let y = panel.y_for(value as f64, max);
        let height = (panel.bottom() - y).max(0) as u32;
        fill_rect(img, x, y, bar_width as u32, height, colors.color_for(category));
    }
}

fn draw_pie(
    img: &mut RgbImage,
    panel: Panel,
    distribution: &CategoryDistribution,
    colors: &CategoryColors,
) {
    let total = distribution.total();
    let cx = panel.x + panel.width as i32 / 2;
    let cy = panel.y + panel.height as i32 / 2;
    let radius = panel.plot_width().min(panel.plot_height()) / 2;

    if total == 0 {
        return;
    }
    if let [(only, _)] = distribution.entries() {
        fill_circle(img, cx, cy, radius, colors.color_for(only));
        return;
    }

    // Slices run clockwise from twelve o'clock.
    let mut start = -FRAC_PI_2;
    for (category, value) in distribution.iter() {
        let sweep = value as f64 / total as f64 * TAU;
        fill_sector(
            img,
            cx,
            cy,
            radius,
            start,
            start + sweep,
            colors.color_for(category),
        );
        start += sweep;
    }
}

fn draw_boxes(
    img: &mut RgbImage,
    panel: Panel,
    statistics: &StatisticsTable,
    colors: &CategoryColors,
) {
    panel.draw_axes(img);
    let n = statistics.len() as i32;
    let max = statistics.values().map(|s| s.max).fold(0.0, f64::max);
    if n == 0 || max <= 0.0 {
        return;
    }

    let slot = panel.plot_width() / n;
    let box_width = (slot / 2).max(1);
    for (i, (category, s)) in statistics.iter().enumerate() {
        let center = panel.left() + slot * i as i32 + slot / 2;
        let x = center - box_width / 2;

        let (low, high) = (panel.y_for(s.min, max), panel.y_for(s.max, max));
        draw_line(img, center, low, center, high, AXIS);

        let top = panel.y_for(s.q3, max);
        let bottom = panel.y_for(s.q1, max);
        // A single observation collapses the box to its median line.
        let height = (bottom - top).max(1) as u32;
        fill_rect(img, x, top, box_width as u32, height, colors.color_for(category));
        draw_rect_outline(img, x, top, box_width as u32, height, AXIS);

        let median = panel.y_for(s.median, max);
        draw_line(img, x, median, x + box_width - 1, median, AXIS);
    }
}

fn draw_scatter(img: &mut RgbImage, panel: Panel, table: &Table, colors: &CategoryColors) {
    panel.draw_axes(img);
    let n = table.len();
    let max = table.iter().map(|r| r.count).max().unwrap_or(0) as f64;
    if n == 0 {
        return;
    }

    for (i, row) in table.iter().enumerate() {
        let offset = (i as f64 + 0.5) / n as f64 * panel.plot_width() as f64;
        let x = panel.left() + offset as i32;
        let y = panel.y_for(row.count as f64, max);
        fill_circle(img, x, y, 4, colors.color_for(&row.category));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_embedded;
    use crate::data::model::Row;

    fn count_color(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn dashboard_has_four_panels_and_legend() {
        let dashboard = render_dashboard(&load_embedded().unwrap());
        assert_eq!(dashboard.image.dimensions(), (PANEL_WIDTH * 2, PANEL_HEIGHT * 2));
        let names: Vec<&str> = dashboard.legend.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Cables", "Batteries", "Appliances"]);
    }

    #[test]
    fn larger_categories_get_more_pixels() {
        let dashboard = render_dashboard(&load_embedded().unwrap());
        let color = |name: &str| {
            dashboard
                .legend
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| *c)
                .unwrap()
        };
        let electronics = count_color(&dashboard.image, color("Electronics"));
        let appliances = count_color(&dashboard.image, color("Appliances"));
        assert!(electronics > appliances);
        assert!(appliances > 0);
    }

    #[test]
    fn empty_and_zero_tables_render() {
        let empty = render_dashboard(&Table::default());
        assert!(empty.legend.is_empty());

        let zeros = render_dashboard(&Table::from_rows(vec![Row::new("Cables", 0)]));
        assert_eq!(zeros.legend.len(), 1);
    }

    #[test]
    fn single_category_pie_is_a_full_disc() {
        let table = Table::from_rows(vec![Row::new("Cables", 3), Row::new("Cables", 9)]);
        let dashboard = render_dashboard(&table);
        let cables = dashboard.legend[0].1;
        let pie_center = (PANEL_WIDTH + PANEL_WIDTH / 2, PANEL_HEIGHT / 2);
        assert_eq!(*dashboard.image.get_pixel(pie_center.0, pie_center.1), cables);
        assert_eq!(
            *dashboard.image.get_pixel(pie_center.0, pie_center.1 - 50),
            cables
        );
    }

    #[test]
    fn saved_png_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.png");
        let dashboard = render_dashboard(&load_embedded().unwrap());
        save_dashboard(&dashboard, &path).unwrap();
        let reread = image::open(&path).unwrap();
        assert_eq!(reread.width(), PANEL_WIDTH * 2);
        assert_eq!(reread.height(), PANEL_HEIGHT * 2);
    }
}
