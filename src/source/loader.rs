use image::DynamicImage;
use std::iter::ExactSizeIterator;
use std::path::PathBuf;

use crate::error::Result;

use super::source_utils::{collect_images_from_dir, is_image_file};
use super::{Source, SourceMeta};

#[derive(Debug, Clone)]
enum FrameData {
    Path(PathBuf),
    Image(DynamicImage),
}

/// Lazily decodes the frames of a `Source`.
///
/// Frames that fail to decode are logged and skipped.
#[derive(Debug)]
pub struct SourceLoader {
    current_idx: usize,
    frames: Vec<FrameData>,
}

impl SourceLoader {
    pub fn new(source: &Source) -> Result<Self> {
        let frames = match source {
            Source::ImagePath(path) if is_image_file(path) => vec![FrameData::Path(path.clone())],
            Source::ImagePath(path) => {
                tracing::warn!("Not an image file: {:?}", path);
                vec![]
            }
            Source::Directory(dir_path) => collect_images_from_dir(dir_path)?
                .into_iter()
                .map(FrameData::Path)
                .collect(),
            Source::ImagePathVec(paths) => paths
                .iter()
                .filter(|p| is_image_file(p))
                .cloned()
                .map(FrameData::Path)
                .collect(),
            Source::Image(img) => vec![FrameData::Image(img.clone())],
        };

        Ok(Self {
            current_idx: 0,
            frames,
        })
    }

    pub fn total(&self) -> usize {
        self.frames.len()
    }
}

impl Iterator for SourceLoader {
    type Item = (DynamicImage, SourceMeta);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_idx < self.frames.len() {
            let frame_idx = self.current_idx;
            self.current_idx += 1;

            let (image, source_path) = match &self.frames[frame_idx] {
                FrameData::Path(p) => match image::open(p) {
                    Ok(img) => (img, Some(p.clone())),
                    Err(e) => {
                        tracing::error!("Failed to open image: {:?}. Error: {}", p, e);
                        continue;
                    }
                },
                FrameData::Image(img) => (img.clone(), None),
            };

            let meta = SourceMeta {
                frame_idx,
                total_frames: self.frames.len(),
                source_path,
            };
            return Some((image, meta));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames.len() - self.current_idx;
        (remaining, Some(remaining))
    }
}

/// Implement ExactSizeIterator (to use indicatif's ProgressIterator)
impl ExactSizeIterator for SourceLoader {}
