//! Static site build command.

use std::path::Path;

use anyhow::Result;
use docshell_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<String>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = load_config(config_path)?.into_build_config(output);

    let result = StaticBuilder::new(config).build()?;

    if !result.collisions.is_empty() {
        tracing::warn!(
            "{} output files were generated from more than one doc",
            result.collisions.len()
        );
    }

    tracing::info!(
        "Generated {} HTML files in {}ms",
        result.pages,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
