use image::RgbImage;
use imageproc::rect::Rect;

use crate::detect::DetectionRecord;
use crate::error::{AnnotateError, AppError, Result};

use super::AnnotateConfigs;
use super::annotate_utils::{draw_thick_hollow_rect, fill_clipped, rect_intersect};
use super::attributes::format_attributes;
use super::font::LabelFont;
use super::layout::draw_multiline_text;
use super::rectangle::{FaceRect, map_rectangle};

/// Rectangle and label lines of one detection, computed before any drawing
fn prepare(detection: &DetectionRecord) -> Result<(FaceRect, Vec<String>), AnnotateError> {
    let rect = map_rectangle(&detection.rectangle)?;
    let lines = format_attributes(&detection.attributes)?;
    Ok((rect, lines))
}

/// Draw an outline, a label panel and the attribute lines for every face.
///
/// Faces are drawn in input order onto the same surface; later faces may
/// cover earlier ones. The surface is returned for chaining.
///
/// # Errors
///
/// Returns `AppError::Config` for out-of-range `configs`, otherwise
/// `AppError::Annotate` with the detection index. Invalid geometry and
/// missing attributes are skipped instead when `configs.skip_invalid` is set;
/// render failures always abort, leaving the surface partially annotated.
pub fn annotate_faces<'a, F: LabelFont>(
    img: &'a mut RgbImage,
    detections: &[DetectionRecord],
    font: &F,
    configs: &AnnotateConfigs,
) -> Result<&'a mut RgbImage> {
    configs.validate()?;
    let outline_color = configs.outline_rgb();
    let panel_color = configs.panel_rgb();
    let text_color = configs.text_rgb();

    // Occupied areas, only used to report overlaps
    let mut drawn_rects: Vec<Rect> = Vec::with_capacity(detections.len() * 2);

    for (index, detection) in detections.iter().enumerate() {
        let (rect, lines) = match prepare(detection) {
            Ok(prepared) => prepared,
            Err(source) if configs.skip_invalid => {
                tracing::warn!("Skipping detection #{}: {}", index, source);
                continue;
            }
            Err(source) => return Err(AppError::Annotate { index, source }),
        };

        let face_rect = rect.to_rect();
        let origin = configs.panel_anchor.origin(&rect);
        let panel_rect =
            Rect::at(origin.x, origin.y).of_size(configs.panel_width, configs.panel_height);

        if drawn_rects
            .iter()
            .any(|r| rect_intersect(r, &face_rect) || rect_intersect(r, &panel_rect))
        {
            tracing::debug!("Annotation of detection #{} overlaps an earlier face", index);
        }

        draw_thick_hollow_rect(img, face_rect, outline_color, configs.box_thickness);
        fill_clipped(
            img,
            i64::from(origin.x),
            i64::from(origin.y),
            i64::from(configs.panel_width),
            i64::from(configs.panel_height),
            panel_color,
        );
        draw_multiline_text(img, &lines, origin.x, origin.y, font, text_color)
            .map_err(|source| AppError::Annotate { index, source })?;

        drawn_rects.push(face_rect);
        drawn_rects.push(panel_rect);
    }

    Ok(img)
}
