use crate::detect::{FaceAttributes, ScalarFields, fmt_decimal};
use crate::error::AnnotateError;

/// First line of every attribute label
pub const ATTRIBUTES_HEADER: &str = "recognized attributes";

fn required<T>(value: Option<T>, name: &'static str) -> Result<T, AnnotateError> {
    value.ok_or(AnnotateError::MissingField(name))
}

fn push_scalar_fields<S: ScalarFields>(lines: &mut Vec<String>, record: Option<&S>) {
    if let Some(record) = record {
        for (name, value) in record.scalar_fields() {
            lines.push(format!("{name}: {value}"));
        }
    }
}

/// Flatten a face attribute record into ordered `key: value` label lines.
///
/// Emotion entries follow the alphabetical order of their names. Values are
/// never truncated.
///
/// # Errors
///
/// Returns `AnnotateError::MissingField` naming the first absent required
/// attribute.
pub fn format_attributes(attrs: &FaceAttributes) -> Result<Vec<String>, AnnotateError> {
    // validate up front so nothing is emitted for an incomplete record
    let age = required(attrs.age, "age")?;
    let gender = required(attrs.gender.as_deref(), "gender")?;
    let glasses = required(attrs.glasses.as_deref(), "glasses")?;
    let hair = required(attrs.hair.as_ref(), "hair")?;
    let head_pose = attrs.head_pose.as_ref();
    let pitch = required(head_pose.and_then(|p| p.pitch), "head_pose.pitch")?;
    let roll = required(head_pose.and_then(|p| p.roll), "head_pose.roll")?;
    let yaw = required(head_pose.and_then(|p| p.yaw), "head_pose.yaw")?;
    let smile = required(attrs.smile, "smile")?;

    let mut lines = vec![ATTRIBUTES_HEADER.to_string()];
    lines.push(format!("age: {}", fmt_decimal(age)));
    lines.push(format!("gender: {gender}"));
    push_scalar_fields(&mut lines, attrs.facial_hair.as_ref());
    lines.push(format!("glasses: {glasses}"));
    lines.push(format!("hair: {hair}"));
    lines.push(format!(
        "head pose: {{{}, {}, {}}}",
        fmt_decimal(pitch),
        fmt_decimal(roll),
        fmt_decimal(yaw)
    ));
    push_scalar_fields(&mut lines, attrs.makeup.as_ref());
    lines.push(format!("smile: {}", fmt_decimal(smile)));
    if let Some(emotion) = &attrs.emotion {
        for (name, score) in emotion {
            lines.push(format!("{name}: {}", fmt_decimal(*score)));
        }
    }

    Ok(lines)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::detect::{FacialHair, Hair, HairColor, HeadPose, Makeup};
    use std::collections::BTreeMap;

    /// Complete attribute record: 3 facial hair fields, 2 makeup fields, 4 emotions
    pub(crate) fn sample_attributes() -> FaceAttributes {
        let emotion: BTreeMap<String, f64> = [
            ("sadness", 0.9),
            ("anger", 0.0),
            ("neutral", 0.1),
            ("happiness", 0.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        FaceAttributes {
            age: Some(27.0),
            gender: Some("female".to_string()),
            facial_hair: Some(FacialHair {
                moustache: Some(0.0),
                beard: Some(0.1),
                sideburns: Some(0.0),
            }),
            glasses: Some("NoGlasses".to_string()),
            hair: Some(Hair {
                bald: Some(0.06),
                invisible: Some(false),
                hair_color: vec![HairColor {
                    color: "brown".to_string(),
                    confidence: 1.0,
                }],
            }),
            head_pose: Some(HeadPose {
                pitch: Some(-13.2),
                roll: Some(-11.9),
                yaw: Some(5.0),
            }),
            makeup: Some(Makeup {
                eye_makeup: Some(true),
                lip_makeup: Some(false),
            }),
            smile: Some(0.0),
            emotion: Some(emotion),
        }
    }

    #[test]
    fn test_format_line_count_and_header() {
        let lines = format_attributes(&sample_attributes()).unwrap();
        assert_eq!(lines.len(), 1 + 2 + 3 + 2 + 1 + 2 + 1 + 4);
        assert_eq!(lines[0], ATTRIBUTES_HEADER);
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn test_format_line_order() {
        let lines = format_attributes(&sample_attributes()).unwrap();
        let expected = [
            "recognized attributes",
            "age: 27.0",
            "gender: female",
            "moustache: 0.0",
            "beard: 0.1",
            "sideburns: 0.0",
            "glasses: NoGlasses",
            "hair: {bald: 0.06, invisible: false, colors: [brown 1.0]}",
            "head pose: {-13.2, -11.9, 5.0}",
            "eye_makeup: true",
            "lip_makeup: false",
            "smile: 0.0",
            "anger: 0.0",
            "happiness: 0.0",
            "neutral: 0.1",
            "sadness: 0.9",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_format_missing_smile() {
        let attrs = FaceAttributes {
            smile: None,
            ..sample_attributes()
        };
        assert_eq!(
            format_attributes(&attrs),
            Err(AnnotateError::MissingField("smile"))
        );
    }

    #[test]
    fn test_format_missing_head_pose_angle() {
        let mut attrs = sample_attributes();
        attrs.head_pose.as_mut().unwrap().roll = None;
        assert_eq!(
            format_attributes(&attrs),
            Err(AnnotateError::MissingField("head_pose.roll"))
        );

        attrs.head_pose = None;
        assert_eq!(
            format_attributes(&attrs),
            Err(AnnotateError::MissingField("head_pose.pitch"))
        );
    }

    #[test]
    fn test_format_empty_record_reports_age_first() {
        assert_eq!(
            format_attributes(&FaceAttributes::default()),
            Err(AnnotateError::MissingField("age"))
        );
    }

    #[test]
    fn test_format_optional_sub_records() {
        let attrs = FaceAttributes {
            facial_hair: None,
            makeup: None,
            emotion: None,
            ..sample_attributes()
        };
        let lines = format_attributes(&attrs).unwrap();
        assert_eq!(lines.len(), 1 + 2 + 2 + 1 + 1);
    }

    #[test]
    fn test_format_long_values_untruncated() {
        let long = "x".repeat(500);
        let attrs = FaceAttributes {
            glasses: Some(long.clone()),
            ..sample_attributes()
        };
        let lines = format_attributes(&attrs).unwrap();
        assert!(lines.contains(&format!("glasses: {long}")));
    }
}
