use image::{Rgb, RgbImage};

use crate::error::AnnotateError;

use super::font::LabelFont;

/// Draw `lines` top-to-bottom starting at `(x, y)`.
///
/// Each line advances the cursor by its measured height. Lines wider than the
/// panel are not wrapped, and lines lying entirely outside the image are
/// measured but not drawn.
///
/// # Errors
///
/// Returns `AnnotateError::RenderFailure` if the font measures a non-empty
/// line with zero height.
pub fn draw_multiline_text<F: LabelFont>(
    img: &mut RgbImage,
    lines: &[String],
    x: i32,
    y: i32,
    font: &F,
    color: Rgb<u8>,
) -> Result<(), AnnotateError> {
    let (img_w, img_h) = img.dimensions();
    let mut cursor = i64::from(y);
    for line in lines {
        let (line_width, line_height) = font.text_size(line);
        if line_height == 0 && !line.is_empty() {
            return Err(AnnotateError::RenderFailure(format!(
                "font measured zero height for line {:?}",
                line
            )));
        }

        let visible = cursor < i64::from(img_h)
            && cursor + i64::from(line_height) > 0
            && i64::from(x) < i64::from(img_w)
            && i64::from(x) + i64::from(line_width) > 0;
        if visible {
            // visible rows fit in i32
            font.draw_text(img, color, x, cursor as i32, line);
        }
        cursor += i64::from(line_height);
    }
    Ok(())
}
