use std::collections::BTreeMap;

use image::Rgb;
use palette::{Hsl, IntoColor, Srgb};

pub const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

/// `#rrggbb` form of a colour, for legends printed to the terminal.
pub fn hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

// ---------------------------------------------------------------------------
// Color mapping: category → colour
// ---------------------------------------------------------------------------

/// Assigns each category a distinct colour, in the order given.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    order: Vec<String>,
    mapping: BTreeMap<String, Rgb<u8>>,
}

impl CategoryColors {
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let mut order: Vec<String> = Vec::new();
        for c in categories {
            if !order.iter().any(|o| o == c) {
                order.push(c.to_string());
            }
        }
        let mapping = order
            .iter()
            .cloned()
            .zip(generate_palette(order.len()))
            .collect();
        Self { order, mapping }
    }

    /// Colour for `category`, gray when unknown.
    pub fn color_for(&self, category: &str) -> Rgb<u8> {
        self.mapping.get(category).copied().unwrap_or(GRAY)
    }

    /// Legend entries (category → colour) in assignment order.
    pub fn legend_entries(&self) -> Vec<(String, Rgb<u8>)> {
        self.order
            .iter()
            .map(|c| (c.clone(), self.color_for(c)))
            .collect()
    }
}
