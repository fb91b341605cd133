//! Static site builder.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::{default_nav, CategoryTable, Link};
use crate::discovery::{discover, DocPath};
use crate::emitter::Emitter;
use crate::mapper::{derive_title, OutputLocation, PathMapper};
use crate::templates::Context;

/// Default client-side Markdown renderer.
pub const DEFAULT_RENDERER_URL: &str = "https://cdn.jsdelivr.net/npm/marked/marked.min.js";

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the docs and output directories are relative to
    pub site_root: PathBuf,

    /// Docs directory, relative to the site root
    pub docs_dir: String,

    /// Output directory, relative to the site root
    pub output_dir: String,

    /// Site title
    pub title: String,

    /// Stylesheet, relative to the site root
    pub stylesheet: String,

    /// Client-side Markdown renderer script
    pub renderer_url: String,

    /// Footer text
    pub footer: String,

    /// Sidebar navigation links, relative to the site root
    pub nav: Vec<Link>,

    /// Category layout
    pub categories: CategoryTable,

    /// Write pages through a temp file and rename
    pub atomic_writes: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            docs_dir: "docs".to_string(),
            output_dir: "html".to_string(),
            title: "Playwright TypeScript Framework Documentation".to_string(),
            stylesheet: "styles.css".to_string(),
            renderer_url: DEFAULT_RENDERER_URL.to_string(),
            footer: "\u{a9} 2024 Playwright TypeScript Framework. Built for Netlify.".to_string(),
            nav: default_nav(),
            categories: CategoryTable::default(),
            atomic_writes: false,
        }
    }
}

impl BuildConfig {
    /// Check that the docs, output and category directories stay inside the site root.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.docs_dir.trim_matches('/').is_empty() {
            return Err(BuildError::ConfigError(
                "docs directory must not be empty".to_string(),
            ));
        }

        ensure_relative("docs", &self.docs_dir)?;
        ensure_relative("output", &self.output_dir)?;

        for rule in self.categories.iter() {
            ensure_relative(&format!("{} category", rule.name), rule.subdir())?;
        }

        Ok(())
    }
}

fn ensure_relative(name: &str, dir: &str) -> Result<(), BuildError> {
    let path = Path::new(dir);
    if path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(BuildError::ConfigError(format!(
            "{} directory must be relative to the site root: {}",
            name, dir
        )));
    }

    Ok(())
}

/// Two or more docs written to the same output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Output path, relative to the site root
    pub output: String,
    /// Colliding docs in discovery order; the last one is written
    pub sources: Vec<DocPath>,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Output paths that more than one doc mapped to
    pub collisions: Vec<Collision>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source doc
    doc: DocPath,

    /// Output location
    location: OutputLocation,

    /// Template context
    context: Context,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    mapper: PathMapper,
    emitter: Emitter,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let mapper = PathMapper::new(
            config.docs_dir.as_str(),
            config.output_dir.as_str(),
            config.categories.clone(),
        );
        let emitter =
            Emitter::new(config.site_root.clone()).with_atomic_writes(config.atomic_writes);

        Self {
            config,
            mapper,
            emitter,
        }
    }

    /// Build the static site.
    ///
    /// Stops at the first failure; pages already written stay on disk.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.config.validate()?;

        let docs_root = self.config.site_root.join(&self.config.docs_dir);
        let docs = discover(&docs_root, &self.config.docs_dir)?;
        tracing::debug!("Discovered {} docs in {}", docs.len(), docs_root.display());

        let pages: Vec<PageInfo> = docs.into_iter().map(|doc| self.plan_page(doc)).collect();

        let collisions = find_collisions(&pages);
        for collision in &collisions {
            let sources: Vec<&str> = collision.sources.iter().map(DocPath::as_str).collect();
            tracing::warn!(
                "{} is generated from {} docs, keeping the last: {}",
                collision.output,
                sources.len(),
                sources.join(", ")
            );
        }

        // Later docs win a collision, matching sequential overwrite order.
        let mut winners: HashMap<&OutputLocation, usize> = HashMap::new();
        for (index, page) in pages.iter().enumerate() {
            winners.insert(&page.location, index);
        }
        let to_write: Vec<&PageInfo> = pages
            .iter()
            .enumerate()
            .filter(|(index, page)| winners.get(&page.location) == Some(index))
            .map(|(_, page)| page)
            .collect();

        let results: Vec<Result<PathBuf, BuildError>> = to_write
            .par_iter()
            .map(|page| -> Result<PathBuf, BuildError> {
                let written = self.emitter.emit(&page.doc, &page.location, &page.context)?;
                tracing::info!("Generated: {} -> {}", page.location, page.doc);
                Ok(written)
            })
            .collect();

        let written = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: written.len(),
            collisions,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.site_root.join(&self.config.output_dir),
        })
    }

    /// Map a doc and prepare its template context.
    fn plan_page(&self, doc: DocPath) -> PageInfo {
        let location = self.mapper.map(&doc);
        let category = self.mapper.category_of(&doc);

        let context = Context {
            title: derive_title(doc.file_name()),
            site_title: self.config.title.clone(),
            md_path: doc.to_string(),
            depth: location.depth(),
            stylesheet: self.config.stylesheet.clone(),
            renderer_url: self.config.renderer_url.clone(),
            footer: self.config.footer.clone(),
            nav: self.config.nav.clone(),
            categories: self.category_links(),
            sidebar: self.mapper.sidebar_for(category).cloned(),
        };

        PageInfo {
            doc,
            location,
            context,
        }
    }

    /// Dropdown entries for every known category.
    fn category_links(&self) -> Vec<Link> {
        self.mapper
            .categories()
            .iter()
            .map(|rule| Link::new(rule.display_title(), format!("{}.html", rule.name)))
            .collect()
    }
}

fn find_collisions(pages: &[PageInfo]) -> Vec<Collision> {
    let mut by_output: HashMap<String, Vec<DocPath>> = HashMap::new();
    for page in pages {
        by_output
            .entry(page.location.path())
            .or_default()
            .push(page.doc.clone());
    }

    let mut collisions: Vec<Collision> = by_output
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(output, sources)| Collision { output, sources })
        .collect();
    collisions.sort_by(|a, b| a.output.cmp(&b.output));

    collisions
}
