//! Markdown file discovery.

use std::fmt;
use std::path::Path;

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Markdown file extension, including the dot.
pub const MARKDOWN_EXT: &str = ".md";

/// A discovered Markdown file.
///
/// Slash-separated and prefixed with the docs root segment, e.g.
/// `docs/azure/setup.md`. This is also the path the browser fetches,
/// relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocPath(String);

impl DocPath {
    /// Create a doc path, normalizing `\` separators to `/`.
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self(path.replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `setup.md`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Find every Markdown file under `docs_dir`.
///
/// Returned paths are relative to `docs_dir`, prefixed with `prefix` and
/// sorted. Any unreadable entry aborts discovery.
pub fn discover(docs_dir: &Path, prefix: &str) -> Result<Vec<DocPath>, BuildError> {
    if !docs_dir.is_dir() {
        return Err(BuildError::ReadError(format!(
            "Docs directory not found: {}",
            docs_dir.display()
        )));
    }

    let prefix = prefix.trim_matches('/');
    let mut docs = Vec::new();

    for entry in WalkDir::new(docs_dir).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(MARKDOWN_EXT) {
            continue;
        }

        let relative = entry.path().strip_prefix(docs_dir).map_err(|_| {
            BuildError::ReadError(format!(
                "{} is outside {}",
                entry.path().display(),
                docs_dir.display()
            ))
        })?;

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let doc = if prefix.is_empty() {
            DocPath::new(segments.join("/"))
        } else {
            DocPath::new(format!("{}/{}", prefix, segments.join("/")))
        };

        tracing::debug!("Found {}", doc);
        docs.push(doc);
    }

    docs.sort();

    Ok(docs)
}
