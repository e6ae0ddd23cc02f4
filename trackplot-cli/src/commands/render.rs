//! Render command implementation - draw a figure description to PNG (+ HTML image map)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};
use crate::figure::{FigureConfig, PanelOverrides};
use trackplot_core::{RenderSummary, TrackplotError};

pub fn execute(figure: PathBuf, output: PathBuf, overrides: PanelOverrides, json: bool) -> Result<()> {
    log::info!("Starting figure rendering");
    log::info!("Figure file: {}", figure.display());
    log::info!("Output file: {}", output.display());

    check_input(&figure)?;
    let mut config = FigureConfig::load_from_file(&figure)?;
    overrides.apply(&mut config.panel);

    let base_dir = figure.parent().unwrap_or_else(|| Path::new("."));
    let mut panel = config.build_panel(base_dir).map_err(into_cli_error)?;
    log::info!(
        "Panel: {} tracks, window {}..{} of {} at {} px",
        panel.tracks().len(),
        panel.display_start(),
        panel.display_stop(),
        panel.length(),
        panel.width()
    );

    let summary = panel.draw(&output).map_err(CliError::from)?;
    report(&summary, json)?;
    Ok(())
}

fn check_input(figure: &Path) -> CliResult<()> {
    if !figure.exists() {
        return Err(CliError::file_not_found(figure.to_path_buf()));
    }
    Ok(())
}

/// Surface library failures as `CliError` so `main` can attach suggestions
fn into_cli_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<TrackplotError>() {
        Ok(lib_err) => CliError::from(lib_err).into(),
        Err(other) => other,
    }
}

fn report(summary: &RenderSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(());
    }

    log::info!(
        "Rendered {}x{} image with {} feature rows in {} tracks",
        summary.width,
        summary.height,
        summary.feature_rows,
        summary.track_count
    );
    if let Some(html) = &summary.html {
        log::info!("Image map: {} regions in {}", summary.regions, html.display());
    }
    Ok(())
}
