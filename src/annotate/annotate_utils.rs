use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// `(left, top, right, bottom)` with exclusive right/bottom, in `i64`
fn bounds(r: &Rect) -> (i64, i64, i64, i64) {
    let left = i64::from(r.left());
    let top = i64::from(r.top());
    (left, top, left + i64::from(r.width()), top + i64::from(r.height()))
}

pub fn rect_intersect(r1: &Rect, r2: &Rect) -> bool {
    let (r1_left, r1_top, r1_right, r1_bottom) = bounds(r1);
    let (r2_left, r2_top, r2_right, r2_bottom) = bounds(r2);

    !(r2_left >= r1_right || r2_right <= r1_left || r2_top >= r1_bottom || r2_bottom <= r1_top)
}

/// Part of the `width x height` area at `(left, top)` that lies inside the image
pub fn clip_to_image(
    img: &RgbImage,
    left: i64,
    top: i64,
    width: i64,
    height: i64,
) -> Option<Rect> {
    let (img_w, img_h) = img.dimensions();
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(width).min(i64::from(img_w));
    let y1 = top.saturating_add(height).min(i64::from(img_h));

    (x1 > x0 && y1 > y0)
        .then(|| Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32))
}

/// Fill an area, drawing only the part inside the image
pub fn fill_clipped(
    img: &mut RgbImage,
    left: i64,
    top: i64,
    width: i64,
    height: i64,
    color: Rgb<u8>,
) {
    if let Some(visible) = clip_to_image(img, left, top, width, height) {
        draw_filled_rect_mut(img, visible, color);
    }
}

/// Draw a hollow rectangle `thickness` pixels wide, growing inwards.
///
/// Edges are clipped to the image before drawing, so any coordinates are safe.
pub fn draw_thick_hollow_rect(img: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: u32) {
    let (left, top, right, bottom) = bounds(&rect);
    for t in 0..i64::from(thickness) {
        let (l, tp, r, b) = (left + t, top + t, right - t, bottom - t);
        if r <= l || b <= tp {
            break;
        }
        fill_clipped(img, l, tp, r - l, 1, color);
        fill_clipped(img, l, b - 1, r - l, 1, color);
        fill_clipped(img, l, tp, 1, b - tp, color);
        fill_clipped(img, r - 1, tp, 1, b - tp, color);
    }
}
