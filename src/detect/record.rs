use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

use super::fmt_decimal;

/// One detected face as returned by the detection service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    /// Service-assigned face identifier
    #[serde(default)]
    pub face_id: Option<String>,

    /// Face geometry in image pixels
    #[serde(rename = "faceRectangle")]
    pub rectangle: FaceRectangle,

    /// Inferred attributes (empty when the service was not asked for any)
    #[serde(rename = "faceAttributes", default)]
    pub attributes: FaceAttributes,
}

/// `(left, top, width, height)` face box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FaceRectangle {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRectangle {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Nested attribute record of a face.
///
/// Required fields are optional at the type level; the attribute formatter
/// reports the first absent one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceAttributes {
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub facial_hair: Option<FacialHair>,
    pub glasses: Option<String>,
    pub hair: Option<Hair>,
    pub head_pose: Option<HeadPose>,
    pub makeup: Option<Makeup>,
    pub smile: Option<f64>,
    #[serde(deserialize_with = "deserialize_scores")]
    pub emotion: Option<BTreeMap<String, f64>>,
}

/// A scalar attribute value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Score(f64),
    Flag(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Score(v) => f.write_str(&fmt_decimal(*v)),
            Scalar::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Sub-records that flatten into one line per present scalar field
pub trait ScalarFields {
    /// Present fields, in declaration order
    fn scalar_fields(&self) -> Vec<(&'static str, Scalar)>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FacialHair {
    pub moustache: Option<f64>,
    pub beard: Option<f64>,
    pub sideburns: Option<f64>,
}

impl ScalarFields for FacialHair {
    fn scalar_fields(&self) -> Vec<(&'static str, Scalar)> {
        [
            ("moustache", self.moustache),
            ("beard", self.beard),
            ("sideburns", self.sideburns),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, Scalar::Score(v))))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Makeup {
    pub eye_makeup: Option<bool>,
    pub lip_makeup: Option<bool>,
}

impl ScalarFields for Makeup {
    fn scalar_fields(&self) -> Vec<(&'static str, Scalar)> {
        [("eye_makeup", self.eye_makeup), ("lip_makeup", self.lip_makeup)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, Scalar::Flag(v))))
            .collect()
    }
}

/// Head pose angles in degrees
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadPose {
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
    pub yaw: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hair {
    pub bald: Option<f64>,
    pub invisible: Option<bool>,
    pub hair_color: Vec<HairColor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HairColor {
    pub color: String,
    pub confidence: f64,
}

impl fmt::Display for Hair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(bald) = self.bald {
            parts.push(format!("bald: {}", fmt_decimal(bald)));
        }
        if let Some(invisible) = self.invisible {
            parts.push(format!("invisible: {invisible}"));
        }
        let colors: Vec<String> = self
            .hair_color
            .iter()
            .map(|c| format!("{} {}", c.color, fmt_decimal(c.confidence)))
            .collect();
        parts.push(format!("colors: [{}]", colors.join(", ")));
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Score maps keep only entries with a numeric value; nested values are dropped
fn deserialize_scores<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScoreOrOther {
        Score(f64),
        Other(serde::de::IgnoredAny),
    }

    let raw: Option<BTreeMap<String, ScoreOrOther>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(name, value)| match value {
                ScoreOrOther::Score(v) => Some((name, v)),
                ScoreOrOther::Other(_) => None,
            })
            .collect()
    }))
}
