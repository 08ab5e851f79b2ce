/// An example of directly running annotation without using config files.
use std::path::PathBuf;

use anyhow::{Context, Result};
use face_annotate::{
    AnnotateConfigs, JsonSidecarProvider, PanelAnchor, RunArgs, Source, TrueTypeFont, init_logger,
    run_annotation_with,
};

fn main() -> Result<()> {
    init_logger(true);

    let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let image_dir = project_root.join("assets/images");
    let detections_dir = project_root.join("assets/detections");
    let save_dir = project_root.join("results/demo");

    let annotate_cfg = AnnotateConfigs {
        panel_anchor: PanelAnchor::TopRight,
        box_thickness: 2,
        font_size: 12.0,
        ..Default::default()
    };

    let args = RunArgs {
        source: Source::from(image_dir),
        detections_dir: Some(detections_dir.clone()),
        save_dir: Some(save_dir),
        annotate_cfg,
        return_result: true,
        verbose: true,
    };

    let font = TrueTypeFont::load(
        args.annotate_cfg.font_path.as_deref(),
        args.annotate_cfg.font_size,
    )
    .context("Failed to load a label font")?;
    let provider = JsonSidecarProvider::new(Some(detections_dir));

    if let Some(results) =
        run_annotation_with(&args, &provider, &font).context("Failed to run annotation")?
    {
        for result in &results {
            tracing::info!(
                "{}: {} face(s) annotated",
                result.meta.frame_name(),
                result.detections.len()
            );
        }
    }

    Ok(())
}
