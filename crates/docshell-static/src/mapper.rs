//! Mapping from Markdown source paths to HTML output locations.
//!
//! This mapping is the compatibility surface of the generated site: deployed
//! links depend on every page landing at exactly the same place.
//!
//! ```text
//! docs/intro.md                      -> html/intro-intro.html
//! docs/azure/setup.md                -> html/azure/azure-setup.html
//! docs/azure/pipelines/yaml.md       -> html/azure/azure-pipelines-yaml.html
//! docs/examples/basepage-examples.md -> html/examples/basepage-examples.html
//! docs/grid/README.md                -> html/grid.html
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CategoryTable, SidebarSection};
use crate::discovery::{DocPath, MARKDOWN_EXT};

/// Per-category index files that are flattened to `<output root>/<category>.html`.
pub const README_STEM: &str = "README";

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());

/// Where a page is written, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputLocation {
    /// Slash-separated directory, e.g. `html/examples`
    pub dir: String,
    /// File name, e.g. `basepage-examples.html`
    pub filename: String,
}

impl OutputLocation {
    /// Full slash-separated path of the output file.
    pub fn path(&self) -> String {
        if self.dir.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.dir, self.filename)
        }
    }

    /// Prefix leading from this page back to the site root.
    pub fn depth(&self) -> String {
        relative_depth(&self.dir)
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Maps discovered docs to output locations using a [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct PathMapper {
    docs_prefix: String,
    output_root: String,
    categories: CategoryTable,
}

impl PathMapper {
    /// Create a mapper.
    ///
    /// `docs_prefix` is the root segment every [`DocPath`] starts with and
    /// `output_root` the directory pages are written under, both relative to
    /// the site root.
    pub fn new(
        docs_prefix: impl Into<String>,
        output_root: impl Into<String>,
        categories: CategoryTable,
    ) -> Self {
        Self {
            docs_prefix: trim_slashes(docs_prefix.into()),
            output_root: trim_slashes(output_root.into()),
            categories,
        }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn output_root(&self) -> &str {
        &self.output_root
    }

    /// Path segments after the docs root, with the extension removed.
    fn segments<'a>(&self, doc: &'a DocPath) -> Vec<&'a str> {
        let path = doc.as_str();
        let path = if self.docs_prefix.is_empty() {
            path
        } else {
            path.strip_prefix(self.docs_prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(path)
        };
        let path = path.strip_suffix(MARKDOWN_EXT).unwrap_or(path);

        path.split('/').collect()
    }

    /// The first segment after the docs root.
    pub fn category_of<'a>(&self, doc: &'a DocPath) -> &'a str {
        self.segments(doc)[0]
    }

    /// Compute the output location of a doc.
    pub fn map(&self, doc: &DocPath) -> OutputLocation {
        let segments = self.segments(doc);
        let category = segments[0];

        if segments.len() > 1 && segments[segments.len() - 1] == README_STEM {
            return OutputLocation {
                dir: self.output_root.clone(),
                filename: format!("{}.html", category),
            };
        }

        let stem = if segments.len() > 1 {
            segments[1..].join("-")
        } else {
            category.to_string()
        };

        let rule = self.categories.get(category);

        let dir = match rule {
            Some(rule) => join(&self.output_root, rule.subdir()),
            None => self.output_root.clone(),
        };

        let filename = match rule {
            Some(rule) if rule.is_bare(&stem) => format!("{}.html", stem),
            _ => format!("{}-{}.html", category, stem),
        };

        OutputLocation { dir, filename }
    }

    /// Sidebar section for a category, if it has one.
    pub fn sidebar_for(&self, category: &str) -> Option<&SidebarSection> {
        self.categories
            .get(category)
            .and_then(|rule| rule.sidebar.as_ref())
    }
}

/// One `../` per segment of `dir`.
///
/// `html` gives `../`, `html/examples` gives `../../`.
pub fn relative_depth(dir: &str) -> String {
    let levels = dir
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .count();

    "../".repeat(levels)
}

/// Derive a page title from a file name.
///
/// `getting-started.md` becomes `Getting Started`.
pub fn derive_title(name: &str) -> String {
    let name = name.strip_suffix(MARKDOWN_EXT).unwrap_or(name);
    let spaced = SEPARATOR_RUN.replace_all(name, " ");

    let mut title = String::with_capacity(spaced.len());
    let mut word_start = true;

    for c in spaced.chars() {
        if word_start && !c.is_whitespace() {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        word_start = c.is_whitespace();
    }

    title
}

fn trim_slashes(s: String) -> String {
    s.trim_matches('/').to_string()
}

fn join(base: &str, child: &str) -> String {
    match (base.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, child),
    }
}
