//! Raster primitives on top of [`image::RgbImage`].
//!
//! Coordinates are signed so shapes may extend past the image edge; pixels
//! outside the image are skipped.

use image::{Rgb, RgbImage};

/// Set one pixel if it lies inside the image.
pub fn put_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill an axis-aligned rectangle.
pub fn fill_rect(img: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            put_pixel(img, x + dx, y + dy, color);
        }
    }
}

/// One-pixel rectangle outline.
pub fn draw_rect_outline(
    img: &mut RgbImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
) {
    if width == 0 || height == 0 {
        return;
    }
    let x1 = x + width as i32 - 1;
    let y1 = y + height as i32 - 1;
    draw_line(img, x, y, x1, y, color);
    draw_line(img, x, y1, x1, y1, color);
    draw_line(img, x, y, x, y1, color);
    draw_line(img, x1, y, x1, y1, color);
}

/// Draw a line using Bresenham's algorithm.
pub fn draw_line(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        put_pixel(img, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled circle.
pub fn fill_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Filled circular sector between `start` and `end` (radians, clockwise on
/// screen from the positive x axis, `start <= end`).
pub fn fill_sector(
    img: &mut RgbImage,
    cx: i32,
    cy: i32,
    radius: i32,
    start: f64,
    end: f64,
    color: Rgb<u8>,
) {
    use std::f64::consts::TAU;

    if end <= start {
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let angle = (dy as f64).atan2(dx as f64).rem_euclid(TAU);
            if in_sweep(angle, start, end) {
                put_pixel(img, cx + dx, cy + dy, color);
            }
        }
    }
}

fn in_sweep(angle: f64, start: f64, end: f64) -> bool {
    use std::f64::consts::TAU;

    if end - start >= TAU {
        return true;
    }
    let s = start.rem_euclid(TAU);
    let e = end.rem_euclid(TAU);
    if s <= e {
        angle >= s && angle < e
    } else {
        angle >= s || angle < e
    }
}
