use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::source::SourceMeta;

use super::DetectionRecord;

/// Supplies the ordered detections for one source image.
///
/// Implementations own any I/O; the annotation core only consumes the
/// returned records.
pub trait DetectionProvider {
    fn detect(&self, meta: &SourceMeta) -> Result<Vec<DetectionRecord>>;
}

/// Parse a detection service response (a JSON array of faces)
pub fn parse_detections(json: &str) -> Result<Vec<DetectionRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads pre-fetched detections from `<dir>/<image stem>.json`.
///
/// Without an explicit directory the sidecar is looked up next to the image.
#[derive(Debug, Clone, Default)]
pub struct JsonSidecarProvider {
    dir: Option<PathBuf>,
}

impl JsonSidecarProvider {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn sidecar_path(&self, meta: &SourceMeta) -> Result<PathBuf> {
        let file_name = format!("{}.json", meta.frame_stem());
        match (&self.dir, &meta.source_path) {
            (Some(dir), _) => Ok(dir.join(file_name)),
            (None, Some(p)) => Ok(p
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(file_name)),
            (None, None) => Err(AppError::Config(format!(
                "No detections directory configured for in-memory frame {}",
                meta.frame_idx
            ))),
        }
    }
}

impl DetectionProvider for JsonSidecarProvider {
    fn detect(&self, meta: &SourceMeta) -> Result<Vec<DetectionRecord>> {
        let path = self.sidecar_path(meta)?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read detections {:?}: {}", path, e),
            ))
        })?;
        parse_detections(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RESPONSE: &str = r#"[
  {
    "faceId": "c5c24a82-6845-4031-9d5d-978df9175426",
    "faceRectangle": {"width": 78, "height": 78, "left": 394, "top": 54},
    "faceAttributes": {
      "smile": 0.0,
      "headPose": {"pitch": -13.2, "roll": -11.9, "yaw": 5.0},
      "gender": "female",
      "age": 27.0,
      "facialHair": {"moustache": 0.0, "beard": 0.0, "sideburns": 0.0},
      "glasses": "NoGlasses",
      "emotion": {
        "anger": 0.0, "contempt": 0.0, "disgust": 0.0, "fear": 0.0,
        "happiness": 0.0, "neutral": 0.0, "sadness": 1.0, "surprise": 0.0
      },
      "makeup": {"eyeMakeup": true, "lipMakeup": true},
      "accessories": [],
      "hair": {
        "bald": 0.06,
        "invisible": false,
        "hairColor": [{"color": "brown", "confidence": 1.0}]
      }
    }
  }
]"#;

    fn meta_for(path: PathBuf) -> SourceMeta {
        SourceMeta {
            frame_idx: 0,
            total_frames: 1,
            source_path: Some(path),
        }
    }

    #[test]
    fn test_parse_service_response() {
        let records = parse_detections(RESPONSE).unwrap();
        assert_eq!(records.len(), 1);

        let face = &records[0];
        assert_eq!(
            face.face_id.as_deref(),
            Some("c5c24a82-6845-4031-9d5d-978df9175426")
        );
        assert_eq!(face.rectangle.left, 394);
        assert_eq!(face.rectangle.width, 78);

        let attrs = &face.attributes;
        assert_eq!(attrs.age, Some(27.0));
        assert_eq!(attrs.gender.as_deref(), Some("female"));
        assert_eq!(attrs.head_pose.as_ref().unwrap().pitch, Some(-13.2));
        assert_eq!(attrs.makeup.as_ref().unwrap().eye_makeup, Some(true));
        assert_eq!(attrs.emotion.as_ref().unwrap().len(), 8);
        assert_eq!(attrs.hair.as_ref().unwrap().hair_color[0].color, "brown");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_detections("{not json"),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn test_sidecar_next_to_image() {
        let provider = JsonSidecarProvider::default();
        let meta = meta_for(PathBuf::from("/data/photos/face.jpg"));
        assert_eq!(
            provider.sidecar_path(&meta).unwrap(),
            PathBuf::from("/data/photos/face.json")
        );
    }

    #[test]
    fn test_sidecar_in_detections_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("face.json"), RESPONSE).unwrap();

        let provider = JsonSidecarProvider::new(Some(temp_dir.path().to_path_buf()));
        let meta = meta_for(PathBuf::from("/elsewhere/face.jpg"));
        let records = provider.detect(&meta).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_sidecar_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let provider = JsonSidecarProvider::new(Some(temp_dir.path().to_path_buf()));
        let meta = meta_for(PathBuf::from("missing.jpg"));
        assert!(matches!(provider.detect(&meta), Err(AppError::Io(_))));
    }
}
