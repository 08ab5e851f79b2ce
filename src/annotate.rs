// -- submodules
mod annotate_utils;
mod attributes;
mod color;
mod faces;
mod font;
mod layout;
mod rectangle;

pub use attributes::{ATTRIBUTES_HEADER, format_attributes};
pub use faces::annotate_faces;
pub use font::{LabelFont, TrueTypeFont, find_system_font};
pub use layout::draw_multiline_text;
pub use rectangle::{FaceRect, Point, map_rectangle};

#[cfg(test)]
pub(crate) use font::FixedMetricsFont;

// -- external imports
use image::{DynamicImage, Rgb};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{EnumString, VariantNames};

use crate::detect::DetectionRecord;
use crate::error::{AppError, Result};

// -- enums

/// Corner of the face rectangle the label panel is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, VariantNames)]
pub enum PanelAnchor {
    /// Panel hangs below the face, left edges aligned
    #[default]
    #[strum(serialize = "BottomLeft")]
    BottomLeft,

    /// Panel sits right of the face, top edges aligned
    #[strum(serialize = "TopRight")]
    TopRight,
}

impl PanelAnchor {
    /// Panel origin for a given face rectangle
    pub const fn origin(self, rect: &FaceRect) -> Point {
        match self {
            PanelAnchor::BottomLeft => Point {
                x: rect.top_left.x,
                y: rect.bottom_right.y,
            },
            PanelAnchor::TopRight => Point {
                x: rect.bottom_right.x,
                y: rect.top_left.y,
            },
        }
    }
}

/// Custom deserializer with helpful error message
pub fn deserialize_panel_anchor<'de, D>(deserializer: D) -> Result<PanelAnchor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    PanelAnchor::from_str(&value).map_err(|_| {
        let variants = PanelAnchor::VARIANTS;
        serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&value),
            &format!("one of {}", variants.join(", ")).as_str(),
        )
    })
}

// -- configs

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnotateConfigs {
    /// face outline color
    pub outline_color: [u8; 3],

    /// label panel fill color
    pub panel_color: [u8; 3],

    /// label text color
    pub text_color: [u8; 3],

    /// label panel width in pixels
    pub panel_width: u32,

    /// label panel height in pixels
    pub panel_height: u32,

    /// where the label panel is attached to the face rectangle
    #[serde(deserialize_with = "deserialize_panel_anchor")]
    pub panel_anchor: PanelAnchor,

    /// outline thickness in pixels, drawn inwards
    pub box_thickness: u32,

    /// label font size in pixels
    pub font_size: f32,

    /// TrueType font file; a system font is searched when absent
    pub font_path: Option<PathBuf>,

    /// skip detections with invalid geometry or missing attributes instead of failing the image
    pub skip_invalid: bool,
}

impl Default for AnnotateConfigs {
    fn default() -> Self {
        Self {
            outline_color: color::OUTLINE,
            panel_color: color::PANEL,
            text_color: color::TEXT,
            panel_width: 200,
            panel_height: 300,
            panel_anchor: PanelAnchor::default(),
            box_thickness: 1,
            font_size: 10.0,
            font_path: None,
            skip_invalid: false,
        }
    }
}

impl AnnotateConfigs {
    /// Reject values the drawing primitives cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.panel_width == 0 || self.panel_height == 0 {
            return Err(AppError::Config(format!(
                "panel size must be positive, got {}x{}",
                self.panel_width, self.panel_height
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(AppError::Config(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.box_thickness == 0 {
            return Err(AppError::Config("box_thickness must be at least 1".to_string()));
        }
        Ok(())
    }

    pub const fn outline_rgb(&self) -> Rgb<u8> {
        Rgb(self.outline_color)
    }

    pub const fn panel_rgb(&self) -> Rgb<u8> {
        Rgb(self.panel_color)
    }

    pub const fn text_rgb(&self) -> Rgb<u8> {
        Rgb(self.text_color)
    }
}

/// Annotate a decoded image, returning a new RGB image.
pub fn annotate_image<F: LabelFont>(
    img: &DynamicImage,
    detections: &[DetectionRecord],
    font: &F,
    configs: &AnnotateConfigs,
) -> Result<DynamicImage> {
    let mut annotated = img.to_rgb8();
    annotate_faces(&mut annotated, detections, font, configs)?;
    Ok(DynamicImage::ImageRgb8(annotated))
}
