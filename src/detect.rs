// -- submodules
mod provider;
mod record;

pub use provider::{DetectionProvider, JsonSidecarProvider, parse_detections};
pub use record::{
    DetectionRecord, FaceAttributes, FaceRectangle, FacialHair, Hair, HairColor, HeadPose, Makeup,
    Scalar, ScalarFields,
};

/// Plain decimal text; integral values keep one fractional digit (`27.0`)
pub fn fmt_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_decimal() {
        assert_eq!(fmt_decimal(27.0), "27.0");
        assert_eq!(fmt_decimal(0.0), "0.0");
        assert_eq!(fmt_decimal(-13.2), "-13.2");
        assert_eq!(fmt_decimal(0.125), "0.125");
    }
}
