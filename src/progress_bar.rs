use indicatif::ProgressStyle;

const PROGRESS_TEMPLATE: &str = "{msg}: {wide_bar:.cyan/blue} {pos}/{len} [{elapsed_precise}]";

/// Get a standardized progress bar style
pub fn progress_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar())
}
