use thiserror::Error;

/// Errors raised while annotating a single surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    #[error("invalid face geometry: width={width}, height={height}")]
    InvalidGeometry { width: i32, height: i32 },

    #[error("missing required attribute: {0}")]
    MissingField(&'static str),

    #[error("render failure: {0}")]
    RenderFailure(String),
}

/// Main error type for the library
#[derive(Error, Debug)]
pub enum AppError {
    #[error("TOML config file error: {0}")]
    TomlConfig(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Detection JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Annotation failed at detection #{index}: {source}")]
    Annotate {
        index: usize,
        #[source]
        source: AnnotateError,
    },

    #[error("Image loading failed: {0}")]
    ImageLoad(String),

    #[error("Font loading failed: {0}")]
    FontLoad(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Underlying annotation error, if any
    pub fn annotate_error(&self) -> Option<&AnnotateError> {
        match self {
            AppError::Annotate { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type with default AppError
pub type Result<T, E = AppError> = std::result::Result<T, E>;
