// -- submodules
mod loader;
mod source_utils;

pub use loader::SourceLoader;

// -- external imports
use serde::Deserialize;
use std::path::PathBuf;

/// Where a decoded frame came from
#[derive(Debug, Clone)]
pub struct SourceMeta {
    /// Current frame index (0-based).
    pub frame_idx: usize,
    /// Total frames (1 for single images).
    pub total_frames: usize,
    /// Source path if available.
    pub source_path: Option<PathBuf>,
}

impl SourceMeta {
    /// File stem, or `frame_<idx>` for in-memory frames
    pub fn frame_stem(&self) -> String {
        match &self.source_path {
            Some(p) => p
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            None => format!("frame_{}", self.frame_idx),
        }
    }

    /// File name, or `frame_<idx>` for in-memory frames
    pub fn frame_name(&self) -> String {
        match &self.source_path {
            Some(p) => p
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            None => format!("frame_{}", self.frame_idx),
        }
    }
}

/// Input images to annotate
#[derive(Debug, Clone)]
pub enum Source {
    /// Path to a single image file
    ImagePath(PathBuf),

    /// Path to directory containing multiple images
    Directory(PathBuf),

    /// List of image paths
    ImagePathVec(Vec<PathBuf>),

    /// Image data in memory
    Image(image::DynamicImage),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        if path.is_dir() {
            Source::Directory(path)
        } else {
            Source::ImagePath(path)
        }
    }
}

impl From<Vec<PathBuf>> for Source {
    fn from(paths: Vec<PathBuf>) -> Self {
        Source::ImagePathVec(paths)
    }
}

impl From<image::DynamicImage> for Source {
    fn from(image: image::DynamicImage) -> Self {
        Source::Image(image)
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::ImagePath(PathBuf::new())
    }
}

/// Deserialize a path or a list of paths
pub fn deserialize_source<'de, D>(deserializer: D) -> Result<Source, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PathOrVec {
        Path(PathBuf),
        Vec(Vec<PathBuf>),
    }

    match PathOrVec::deserialize(deserializer)? {
        PathOrVec::Path(path) => Ok(path.into()),
        PathOrVec::Vec(paths) => Ok(paths.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_pathbuf() {
        let path = PathBuf::from("test.jpg");
        match Source::from(path.clone()) {
            Source::ImagePath(p) => assert_eq!(p, path),
            _ => panic!("Expected ImagePath"),
        }

        let dir = tempfile::TempDir::new().unwrap();
        match Source::from(dir.path().to_path_buf()) {
            Source::Directory(p) => assert_eq!(p, dir.path()),
            _ => panic!("Expected Directory"),
        }
    }

    #[test]
    fn test_frame_names() {
        let meta = SourceMeta {
            frame_idx: 3,
            total_frames: 4,
            source_path: Some(PathBuf::from("/photos/kim.jpg")),
        };
        assert_eq!(meta.frame_stem(), "kim");
        assert_eq!(meta.frame_name(), "kim.jpg");

        let meta = SourceMeta {
            source_path: None,
            ..meta
        };
        assert_eq!(meta.frame_stem(), "frame_3");
    }
}
