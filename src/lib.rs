mod annotate;
mod detect;
mod error;
mod logging;
mod progress_bar;
mod run;
mod source;
mod toml_utils;

pub use annotate::{
    ATTRIBUTES_HEADER, AnnotateConfigs, FaceRect, LabelFont, PanelAnchor, Point, TrueTypeFont,
    annotate_faces, annotate_image, draw_multiline_text, find_system_font, format_attributes,
    map_rectangle,
};
pub use detect::{
    DetectionProvider, DetectionRecord, FaceAttributes, FaceRectangle, FacialHair, Hair,
    HairColor, HeadPose, JsonSidecarProvider, Makeup, Scalar, ScalarFields, parse_detections,
};
pub use error::{AnnotateError, AppError, Result};
pub use logging::init_logger;
pub use progress_bar::progress_bar_style;
pub use source::{Source, SourceLoader, SourceMeta};
pub use toml_utils::parse_toml;

// Core annotation pipeline
pub use run::{AnnotateResult, RunArgs, run_annotation, run_annotation_with};
