use std::path::{Path, PathBuf};

use crate::error::Result;

pub fn is_image_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(
            ext.as_str(),
            "jpg" | "jpeg" | "png" | "bmp" | "gif" | "webp" | "tiff" | "tif"
        )
    })
}

/// Image files directly inside `dir`, sorted by path
pub fn collect_images_from_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut image_paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    image_paths.sort();
    Ok(image_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_skips_sidecars() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.png", "a.JPG", "a.json", "notes.txt"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let images = collect_images_from_dir(temp_dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }
}
