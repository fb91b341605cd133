//! Writing page shells to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;
use crate::discovery::DocPath;
use crate::mapper::OutputLocation;
use crate::templates::{Context, TemplateEngine};

/// Page template used for every doc.
const PAGE_TEMPLATE: &str = "page.html";

/// Renders a page and writes it under the site root.
pub struct Emitter {
    site_root: PathBuf,
    templates: TemplateEngine,
    atomic_writes: bool,
}

impl Emitter {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            templates: TemplateEngine::new(),
            atomic_writes: false,
        }
    }

    /// Write through a sibling temp file and rename it into place.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Emit one page, overwriting any existing file.
    ///
    /// Returns the path written.
    pub fn emit(
        &self,
        doc: &DocPath,
        location: &OutputLocation,
        context: &Context,
    ) -> Result<PathBuf, BuildError> {
        let html = self
            .templates
            .render_page(PAGE_TEMPLATE, context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", doc, e)))?;

        let dir = self.site_root.join(&location.dir);
        fs::create_dir_all(&dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", dir.display(), e)))?;

        let path = dir.join(&location.filename);
        if self.atomic_writes {
            write_atomic(&path, &html)?;
        } else {
            fs::write(&path, html)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;
        }

        Ok(path)
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), BuildError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Link;
    use tempfile::tempdir;

    fn context(md_path: &str, depth: &str) -> Context {
        Context {
            title: "Setup".to_string(),
            site_title: "Docs".to_string(),
            md_path: md_path.to_string(),
            depth: depth.to_string(),
            stylesheet: "styles.css".to_string(),
            renderer_url: "marked.min.js".to_string(),
            footer: String::new(),
            nav: vec![Link::new("Home", "index.html")],
            categories: vec![],
            sidebar: None,
        }
    }

    fn location(dir: &str, filename: &str) -> OutputLocation {
        OutputLocation {
            dir: dir.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn creates_directory_and_writes_page() {
        let temp = tempdir().unwrap();
        let emitter = Emitter::new(temp.path());

        let written = emitter
            .emit(
                &"docs/azure/setup.md".into(),
                &location("html/azure", "azure-setup.html"),
                &context("docs/azure/setup.md", "../../"),
            )
            .unwrap();

        assert_eq!(written, temp.path().join("html/azure/azure-setup.html"));
        let html = fs::read_to_string(written).unwrap();
        assert!(html.contains(r#"fetch("../../docs/azure/setup.md")"#));
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("html")).unwrap();
        fs::write(temp.path().join("html/grid.html"), "stale").unwrap();

        let emitter = Emitter::new(temp.path());
        emitter
            .emit(
                &"docs/grid/README.md".into(),
                &location("html", "grid.html"),
                &context("docs/grid/README.md", "../"),
            )
            .unwrap();

        let html = fs::read_to_string(temp.path().join("html/grid.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let emitter = Emitter::new(temp.path()).with_atomic_writes(true);

        emitter
            .emit(
                &"docs/intro.md".into(),
                &location("html", "intro-intro.html"),
                &context("docs/intro.md", "../"),
            )
            .unwrap();

        assert!(temp.path().join("html/intro-intro.html").exists());
        assert!(!temp.path().join("html/intro-intro.html.tmp").exists());
    }

    #[test]
    fn reports_write_failures() {
        let temp = tempdir().unwrap();
        // A file where the output directory should be.
        fs::write(temp.path().join("html"), "").unwrap();

        let emitter = Emitter::new(temp.path());
        let result = emitter.emit(
            &"docs/azure/setup.md".into(),
            &location("html/azure", "azure-setup.html"),
            &context("docs/azure/setup.md", "../../"),
        );

        assert!(matches!(result, Err(BuildError::WriteError(_))));
    }
}
