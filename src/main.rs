/// Annotate images with face attributes from pre-fetched detection results.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use face_annotate::{init_logger, parse_toml, run_annotation};

#[derive(Debug, Parser)]
#[command(version, about = "Draw face rectangles and attribute labels onto images")]
struct Cli {
    /// TOML config file; relative paths inside resolve against its directory
    #[arg(short, long, default_value = "assets/configs/annotate.toml")]
    config: PathBuf,

    /// Override the config's save directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let project_root = cli
        .config
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    let mut args = parse_toml(&cli.config, &project_root)
        .with_context(|| format!("Failed to parse TOML config {:?}", cli.config))?;
    if let Some(save_dir) = cli.save_dir {
        args.save_dir = Some(save_dir);
    }
    args.verbose |= cli.verbose;

    if let Some(results) = run_annotation(&args).context("Failed to run annotation")? {
        tracing::info!("Total annotated images returned: {}", results.len());
    }

    Ok(())
}
