use std::path::Path;

use anyhow::{Context, Result};

/// An uploaded item: its file name and raw bytes.
///
/// The bytes are only used to show a preview summary; classification looks
/// at `file_name` alone.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Format and pixel size of an uploaded image, if it decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePreview {
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Upload {
    /// Read an upload from disk. Only the final path component becomes the
    /// file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", path.display()))?
            .to_string();
        let bytes =
            std::fs::read(path).with_context(|| format!("reading upload {}", path.display()))?;
        log::debug!("read upload {file_name} ({} bytes)", bytes.len());
        Ok(Self { file_name, bytes })
    }

    /// Decode the payload far enough to describe it. `None` when the bytes
    /// are not a supported image.
    pub fn preview(&self) -> Option<ImagePreview> {
        let format = image::guess_format(&self.bytes).ok()?;
        let decoded = image::load_from_memory_with_format(&self.bytes, format).ok()?;
        Some(ImagePreview {
            format: format_name(format),
            width: decoded.width(),
            height: decoded.height(),
        })
    }
}

fn format_name(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Jpeg => "JPEG",
        _ => "image",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn file_name_is_last_component() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old_cable_wire.txt");
        std::fs::write(&path, b"not an image").unwrap();

        let upload = Upload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "old_cable_wire.txt");
        assert_eq!(upload.bytes, b"not an image");
        assert_eq!(upload.preview(), None);
    }

    #[test]
    fn png_preview_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone.png");
        RgbImage::from_pixel(7, 5, Rgb([1, 2, 3])).save(&path).unwrap();

        let preview = Upload::from_path(&path).unwrap().preview().unwrap();
        assert_eq!(
            preview,
            ImagePreview {
                format: "PNG",
                width: 7,
                height: 5
            }
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::from_path(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(err.to_string().contains("reading upload"));
    }
}
