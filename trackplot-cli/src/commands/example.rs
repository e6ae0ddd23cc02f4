//! `example` and `glyphs` commands

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::figure::FigureConfig;
use trackplot_core::GlyphKind;

/// Print an example figure, or write it to `output`
pub fn execute(output: Option<PathBuf>) -> Result<()> {
    let content = FigureConfig::example_toml()?;
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write example figure: {}", path.display()))?;
            log::info!("Wrote example figure to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub fn list_glyphs() {
    for kind in GlyphKind::ALL {
        let note = if kind.uses_segments() { " (uses segments)" } else { "" };
        println!("{}{}", kind, note);
    }
}
