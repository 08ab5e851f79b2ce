use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Well-known locations of a sans-serif TrueType font
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A fixed font used to measure and render label lines
pub trait LabelFont {
    /// Rendered `(width, height)` of one line
    fn text_size(&self, text: &str) -> (u32, u32);

    /// Draw one line with its top-left corner at `(x, y)`
    fn draw_text(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str);
}

/// TrueType font at a fixed pixel size
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    font: FontArc,
    scale: PxScale,
}

impl TrueTypeFont {
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| AppError::FontLoad(e.to_string()))?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    /// Load from `path`, or from the first system font found when `path` is `None`
    pub fn load(path: Option<&Path>, size: f32) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => find_system_font().ok_or_else(|| {
                AppError::FontLoad("no system font found, set `font_path`".to_string())
            })?,
        };

        let data = std::fs::read(&path)
            .map_err(|e| AppError::FontLoad(format!("failed to read {:?}: {}", path, e)))?;
        tracing::debug!("Loaded font: {:?}", path);
        Self::from_bytes(data, size)
    }
}

impl LabelFont for TrueTypeFont {
    fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    fn draw_text(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(img, color, x, y, self.scale, &self.font, text);
    }
}

pub fn find_system_font() -> Option<PathBuf> {
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Monospace stand-in with fixed metrics that records every draw call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FixedMetricsFont {
    pub char_width: u32,
    pub line_height: u32,
    pub drawn: std::cell::RefCell<Vec<(i32, i32, String)>>,
}

#[cfg(test)]
impl FixedMetricsFont {
    pub fn new(char_width: u32, line_height: u32) -> Self {
        Self {
            char_width,
            line_height,
            drawn: Default::default(),
        }
    }

    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.drawn.borrow().iter().map(|(x, y, _)| (*x, *y)).collect()
    }
}

#[cfg(test)]
impl LabelFont for FixedMetricsFont {
    fn text_size(&self, text: &str) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }
        (text.chars().count() as u32 * self.char_width, self.line_height)
    }

    fn draw_text(&self, _img: &mut RgbImage, _color: Rgb<u8>, x: i32, y: i32, text: &str) {
        self.drawn.borrow_mut().push((x, y, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_font_file() {
        let result = TrueTypeFont::load(Some(Path::new("/nonexistent/font.ttf")), 10.0);
        assert!(matches!(result, Err(AppError::FontLoad(_))));
    }

    #[test]
    fn test_load_invalid_font_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        let result = TrueTypeFont::load(Some(&path), 10.0);
        assert!(matches!(result, Err(AppError::FontLoad(_))));
    }

    #[test]
    fn test_system_font_measures_lines() {
        // only meaningful where a system font is installed
        let Some(path) = find_system_font() else {
            return;
        };
        let font = TrueTypeFont::load(Some(&path), 10.0).unwrap();
        let (w, h) = font.text_size("age: 27.0");
        assert!(w > 0);
        assert!(h > 0);
    }
}
