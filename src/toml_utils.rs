// -- imports
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::annotate::AnnotateConfigs;
use crate::error::{AppError, Result};
use crate::run::RunArgs;
use crate::source::Source;

// -- config

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    run: RunArgs,
    annotate: AnnotateConfigs,
}

fn resolve(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

impl TomlConfig {
    /// Parse TOML config file with explicit project root for path resolution.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if:
    /// - The path is not a valid toml file
    /// - File read fails
    /// - TOML parsing fails
    /// - Annotation settings are out of range
    pub fn from_toml(toml_path: &Path, project_root: &Path) -> Result<Self> {
        if !toml_path.is_file() || toml_path.extension().is_none_or(|ext| ext != "toml") {
            return Err(AppError::Config(format!(
                "TOML config path is not a valid .toml file: {:?}",
                toml_path
            )));
        }

        let content = std::fs::read_to_string(toml_path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.annotate.validate()?;
        config.resolve_paths(project_root);

        // Transfer annotate config to run args
        config.run.annotate_cfg = config.annotate.clone();

        Ok(config)
    }

    /// Resolve relative paths against project root
    fn resolve_paths(&mut self, project_root: &Path) {
        self.run.source = match &self.run.source {
            // file vs directory is only known once the path is resolved
            Source::ImagePath(p) | Source::Directory(p) => Source::from(resolve(p, project_root)),
            Source::ImagePathVec(paths) => Source::ImagePathVec(
                paths.iter().map(|p| resolve(p, project_root)).collect(),
            ),
            Source::Image(img) => Source::Image(img.clone()),
        };

        for dir in [&mut self.run.detections_dir, &mut self.run.save_dir]
            .into_iter()
            .flatten()
        {
            *dir = resolve(dir, project_root);
        }

        if let Some(font_path) = self.annotate.font_path.as_mut() {
            *font_path = resolve(font_path, project_root);
        }
    }
}

impl From<TomlConfig> for RunArgs {
    fn from(config: TomlConfig) -> Self {
        config.run
    }
}

// -- public API

/// Parse TOML config file and return RunArgs.
///
/// Relative paths are resolved against `project_root`.
///
/// # Errors
///
/// Returns `AppError` if TOML parsing, validation or path resolution fails.
pub fn parse_toml(toml_path: &Path, project_root: &Path) -> Result<RunArgs> {
    TomlConfig::from_toml(toml_path, project_root).map(Into::into)
}

// -- tests
