use image::DynamicImage;
use indicatif::{ProgressFinish, ProgressIterator};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::annotate::{AnnotateConfigs, LabelFont, TrueTypeFont, annotate_image};
use crate::detect::{DetectionProvider, DetectionRecord, JsonSidecarProvider};
use crate::error::Result;
use crate::progress_bar::progress_bar_style;
use crate::source::{Source, SourceLoader, SourceMeta, deserialize_source};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunArgs {
    /// Input source (image, directory or list of images)
    #[serde(deserialize_with = "deserialize_source")]
    pub source: Source,

    /// Directory holding `<image stem>.json` detection files; defaults to each image's directory
    pub detections_dir: Option<PathBuf>,

    /// Directory to save annotated images
    pub save_dir: Option<PathBuf>,

    /// Annotate configurations
    #[serde(skip)]
    pub annotate_cfg: AnnotateConfigs,

    /// Whether to store and return annotated images
    pub return_result: bool,

    /// Show verbose output
    pub verbose: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            source: Default::default(),
            detections_dir: None,
            save_dir: None,
            annotate_cfg: Default::default(),
            return_result: false,
            verbose: false,
        }
    }
}

/// Annotation result for a single image
#[derive(Debug)]
pub struct AnnotateResult {
    /// Detections drawn on the image
    pub detections: Vec<DetectionRecord>,

    /// Annotated image
    pub annotated: DynamicImage,

    /// Source meta information
    pub meta: SourceMeta,
}

/// Annotate every image of `args.source` with detections read from JSON sidecars.
///
/// Returns the annotated images when `args.return_result` is set.
pub fn run_annotation(args: &RunArgs) -> Result<Option<Vec<AnnotateResult>>> {
    args.annotate_cfg.validate()?;
    let font = TrueTypeFont::load(
        args.annotate_cfg.font_path.as_deref(),
        args.annotate_cfg.font_size,
    )?;
    let provider = JsonSidecarProvider::new(args.detections_dir.clone());
    run_annotation_with(args, &provider, &font)
}

/// Same as [`run_annotation`] with an explicit detection provider and font.
///
/// Each image gets its own surface. A failing image is logged and skipped.
pub fn run_annotation_with<P, F>(
    args: &RunArgs,
    provider: &P,
    font: &F,
) -> Result<Option<Vec<AnnotateResult>>>
where
    P: DetectionProvider,
    F: LabelFont,
{
    let start_time = Instant::now();
    let annotate_cfg = &args.annotate_cfg;
    let verbose = args.verbose;

    tracing::info!("Running face annotation...");
    tracing::info!("[Source]: {:?}", args.source);

    if let Some(dir) = &args.save_dir {
        std::fs::create_dir_all(dir)?;
    }

    let loader = SourceLoader::new(&args.source)?;
    let total_frames = loader.total();
    tracing::info!("Total frames to process: {}", total_frames);
    tracing::info!("-----------------------------------------");

    let mut final_results = if args.return_result {
        Some(Vec::with_capacity(total_frames))
    } else {
        None
    };

    for (image, meta) in loader
        .progress_with_style(progress_bar_style())
        .with_message("Annotating")
        .with_finish(ProgressFinish::WithMessage("Finished".into()))
    {
        let frame_name = meta.frame_name();
        if verbose {
            tracing::debug!("Processing: {}", frame_name);
        }

        let detections = match provider.detect(&meta) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(
                    "Failed to get detections for image: {}, skipping. Error: {}",
                    frame_name,
                    e
                );
                continue;
            }
        };

        if detections.is_empty() {
            tracing::warn!("No face detected from image {}, skipping.", frame_name);
            continue;
        }

        tracing::info!("Detected face IDs from {}:", frame_name);
        for face in &detections {
            tracing::info!("{}", face.face_id.as_deref().unwrap_or("<no face id>"));
        }

        let annotated = match annotate_image(&image, &detections, font, annotate_cfg) {
            Ok(img) => img,
            Err(e) => {
                tracing::error!(
                    "Annotation failed for image: {}, skipping. Error: {}",
                    frame_name,
                    e
                );
                continue;
            }
        };

        if let Some(dir) = &args.save_dir {
            let save_path = dir.join(format!("{}.png", meta.frame_stem()));
            if let Err(e) = annotated.save(&save_path) {
                tracing::error!(
                    "Failed to save annotated image to {:?}, skipping. Error: {}",
                    save_path,
                    e
                );
                continue;
            }
        }

        if let Some(vec) = final_results.as_mut() {
            vec.push(AnnotateResult {
                detections,
                annotated,
                meta,
            });
        }
    }

    if let Some(dir) = &args.save_dir {
        tracing::info!("Results saved to directory: {:?}", dir);
    }
    tracing::info!("Total annotation time: {:.3?}", start_time.elapsed());

    Ok(final_results)
}
