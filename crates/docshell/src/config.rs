//! `docs.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docshell_static::{BuildConfig, CategoryTable, Link};
use serde::Deserialize;

/// Configuration file structure (docs.toml).
///
/// Every field is optional; anything left out keeps the built-in default.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    docs: DocsConfig,
    #[serde(default)]
    build: BuildSettings,
    /// Replaces the sidebar navigation
    nav: Option<Vec<Link>>,
    /// Replaces the category table
    categories: Option<CategoryTable>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DocsConfig {
    root: Option<PathBuf>,
    dir: Option<String>,
    output: Option<String>,
    title: Option<String>,
    stylesheet: Option<String>,
    renderer_url: Option<String>,
    footer: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BuildSettings {
    atomic_writes: Option<bool>,
}

impl ConfigFile {
    /// Parse a config file's contents.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Merge onto the defaults. `output` overrides the configured output dir.
    pub fn into_build_config(self, output: Option<String>) -> BuildConfig {
        let defaults = BuildConfig::default();
        let docs = self.docs;

        BuildConfig {
            site_root: docs.root.unwrap_or(defaults.site_root),
            docs_dir: docs.dir.unwrap_or(defaults.docs_dir),
            output_dir: output.or(docs.output).unwrap_or(defaults.output_dir),
            title: docs.title.unwrap_or(defaults.title),
            stylesheet: docs.stylesheet.unwrap_or(defaults.stylesheet),
            renderer_url: docs.renderer_url.unwrap_or(defaults.renderer_url),
            footer: docs.footer.unwrap_or(defaults.footer),
            nav: self.nav.unwrap_or(defaults.nav),
            categories: self.categories.unwrap_or(defaults.categories),
            atomic_writes: self.build.atomic_writes.unwrap_or(defaults.atomic_writes),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = ConfigFile::parse(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("docs.toml"))
            .unwrap()
            .into_build_config(None);

        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.output_dir, "html");
        assert_eq!(config.categories, CategoryTable::default());
    }

    #[test]
    fn overrides_selected_fields() {
        let config = ConfigFile::parse(
            r#"
[docs]
output = "public"
title = "Handbook"

[build]
atomic_writes = true
"#,
        )
        .unwrap()
        .into_build_config(None);

        assert_eq!(config.output_dir, "public");
        assert_eq!(config.title, "Handbook");
        assert_eq!(config.docs_dir, "docs");
        assert!(config.atomic_writes);
    }

    #[test]
    fn cli_output_wins() {
        let config = ConfigFile::parse("[docs]\noutput = \"public\"\n")
            .unwrap()
            .into_build_config(Some("dist".to_string()));

        assert_eq!(config.output_dir, "dist");
    }

    #[test]
    fn replaces_category_table() {
        let config = ConfigFile::parse(
            r#"
[[categories]]
name = "guides"
output_subdir = "handbook"
bare_stems = ["overview"]

[categories.sidebar]
heading = "Guides"
links = [{ title = "Overview", href = "overview.html" }]

[[categories]]
name = "api"
"#,
        )
        .unwrap()
        .into_build_config(None);

        assert_eq!(config.categories.len(), 2);
        let guides = config.categories.get("guides").unwrap();
        assert_eq!(guides.subdir(), "handbook");
        assert!(guides.is_bare("overview"));
        assert_eq!(guides.sidebar.as_ref().unwrap().links.len(), 1);
        assert_eq!(config.categories.get("api").unwrap().subdir(), "api");
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docs.toml");
        fs::write(&path, "[docs\noutput = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ConfigFile::parse("[docs]\noutptu = \"x\"\n").is_err());
    }
}
