use imageproc::rect::Rect;

use crate::detect::FaceRectangle;
use crate::error::AnnotateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Face box as a corner pair; `bottom_right` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl FaceRect {
    pub const fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x) as u32
    }

    pub const fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y) as u32
    }

    /// Drawing rectangle covering the face box
    pub fn to_rect(&self) -> Rect {
        Rect::at(self.top_left.x, self.top_left.y).of_size(self.width(), self.height())
    }
}

/// Convert a `(left, top, width, height)` face box into a corner pair.
///
/// The result is not clamped to any image bounds.
///
/// # Errors
///
/// Returns `AnnotateError::InvalidGeometry` if width or height is not positive,
/// or if a corner does not fit in `i32`.
pub fn map_rectangle(rect: &FaceRectangle) -> Result<FaceRect, AnnotateError> {
    let invalid = || AnnotateError::InvalidGeometry {
        width: rect.width,
        height: rect.height,
    };

    if rect.width <= 0 || rect.height <= 0 {
        return Err(invalid());
    }

    let right = rect.left.checked_add(rect.width).ok_or_else(invalid)?;
    let bottom = rect.top.checked_add(rect.height).ok_or_else(invalid)?;

    Ok(FaceRect {
        top_left: Point {
            x: rect.left,
            y: rect.top,
        },
        bottom_right: Point {
            x: right,
            y: bottom,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_rectangle_corners() {
        let cases = [(0, 0, 1, 1), (394, 54, 78, 78), (-5, 10, 20, 7)];
        for (l, t, w, h) in cases {
            let rect = map_rectangle(&FaceRectangle::new(l, t, w, h)).unwrap();
            assert_eq!(rect.top_left, Point { x: l, y: t });
            assert_eq!(rect.bottom_right, Point { x: l + w, y: t + h });
            assert_eq!((rect.width(), rect.height()), (w as u32, h as u32));
        }
    }

    #[test]
    fn test_map_rectangle_zero_size() {
        assert_eq!(
            map_rectangle(&FaceRectangle::new(10, 10, 0, 5)),
            Err(AnnotateError::InvalidGeometry {
                width: 0,
                height: 5
            })
        );
        assert!(map_rectangle(&FaceRectangle::new(10, 10, 5, 0)).is_err());
        assert!(map_rectangle(&FaceRectangle::new(10, 10, -3, 5)).is_err());
    }

    #[test]
    fn test_map_rectangle_overflow() {
        assert!(map_rectangle(&FaceRectangle::new(i32::MAX, 0, 1, 1)).is_err());
    }

    #[test]
    fn test_map_rectangle_not_clamped() {
        // far outside any realistic image
        let rect = map_rectangle(&FaceRectangle::new(5000, 6000, 10, 10)).unwrap();
        assert_eq!(rect.bottom_right, Point { x: 5010, y: 6010 });
        let r = rect.to_rect();
        assert_eq!((r.left(), r.top(), r.width(), r.height()), (5000, 6000, 10, 10));
    }
}
