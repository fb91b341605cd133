//! Category table and navigation links.
//!
//! The category table decides where each top-level documentation folder is
//! written and which extra sidebar section its pages receive. It is plain data
//! so it can be loaded from `docs.toml` and handed to the [`PathMapper`].
//!
//! [`PathMapper`]: crate::mapper::PathMapper

use serde::{Deserialize, Serialize};

use crate::mapper::derive_title;

/// A titled hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link text
    pub title: String,
    /// Link target
    pub href: String,
}

impl Link {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// Extra sidebar section shown on every page of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSection {
    /// Section heading
    pub heading: String,
    /// Links, relative to the page's own directory
    #[serde(default)]
    pub links: Vec<Link>,
}

/// How one top-level category is laid out in the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name (first path segment under the docs root)
    pub name: String,

    /// Display title, defaults to the name title-cased
    #[serde(default)]
    pub title: Option<String>,

    /// Output subdirectory, defaults to the category name
    #[serde(default)]
    pub output_subdir: Option<String>,

    /// Stems written without the `<category>-` filename prefix
    #[serde(default)]
    pub bare_stems: Vec<String>,

    /// Sidebar section for pages in this category
    #[serde(default)]
    pub sidebar: Option<SidebarSection>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            output_subdir: None,
            bare_stems: Vec::new(),
            sidebar: None,
        }
    }

    /// Label used in category menus.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| derive_title(&self.name))
    }

    /// Output subdirectory for this category.
    pub fn subdir(&self) -> &str {
        self.output_subdir.as_deref().unwrap_or(&self.name)
    }

    /// Whether `stem` is written without the category prefix.
    pub fn is_bare(&self, stem: &str) -> bool {
        self.bare_stems.iter().any(|s| s == stem)
    }
}

/// Ordered set of known categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// A table with no categories; every page lands in the output root.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Look up a category by name.
    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let examples = CategoryRule {
            title: Some("Examples".to_string()),
            bare_stems: vec![
                "basepage-examples".to_string(),
                "basetest-examples".to_string(),
            ],
            sidebar: Some(SidebarSection {
                heading: "Examples".to_string(),
                links: vec![
                    Link::new("BasePage Examples", "basepage-examples.html"),
                    Link::new("BaseTest Examples", "basetest-examples.html"),
                    Link::new("All Examples", "examples.html"),
                ],
            }),
            ..CategoryRule::new("examples")
        };

        let mut rules = vec![examples];
        rules.extend(
            [
                ("azure", "Azure"),
                ("browserstack", "BrowserStack"),
                ("github-actions", "GitHub Actions"),
                ("grid", "Grid Setup"),
                ("getting-started", "Getting Started"),
                ("troubleshooting", "Troubleshooting"),
                ("workflows", "Workflows"),
            ]
            .into_iter()
            .map(|(name, title)| CategoryRule {
                title: Some(title.to_string()),
                ..CategoryRule::new(name)
            }),
        );

        Self { rules }
    }
}

/// Top navigation shown on every page. Hrefs are prefixed with the page depth.
pub fn default_nav() -> Vec<Link> {
    vec![
        Link::new("Home", "index.html"),
        Link::new("Introduction", "intro.html"),
        Link::new("Getting Started", "getting-started.html"),
        Link::new("Azure", "azure.html"),
        Link::new("BrowserStack", "browserstack.html"),
        Link::new("GitHub Actions", "github-actions.html"),
        Link::new("Grid Setup", "grid.html"),
        Link::new("Examples", "examples.html"),
        Link::new("Troubleshooting", "troubleshooting.html"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_all_categories() {
        let table = CategoryTable::default();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "examples",
                "azure",
                "browserstack",
                "github-actions",
                "grid",
                "getting-started",
                "troubleshooting",
                "workflows",
            ]
        );
    }

    #[test]
    fn only_examples_has_a_sidebar() {
        let table = CategoryTable::default();

        for rule in table.iter() {
            assert_eq!(rule.sidebar.is_some(), rule.name == "examples");
        }

        let links = &table.get("examples").unwrap().sidebar.as_ref().unwrap().links;
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn subdir_defaults_to_name() {
        let mut rule = CategoryRule::new("grid");
        assert_eq!(rule.subdir(), "grid");

        rule.output_subdir = Some("selenium-grid".to_string());
        assert_eq!(rule.subdir(), "selenium-grid");
    }

    #[test]
    fn category_titles_match_nav_labels() {
        let nav = default_nav();

        for rule in CategoryTable::default().iter() {
            let href = format!("{}.html", rule.name);
            if let Some(link) = nav.iter().find(|l| l.href == href) {
                assert_eq!(rule.display_title(), link.title);
            }
        }

        let table = CategoryTable::default();
        assert_eq!(table.get("github-actions").unwrap().display_title(), "GitHub Actions");
    }

    #[test]
    fn display_title_falls_back_to_name() {
        assert_eq!(CategoryRule::new("release-notes").display_title(), "Release Notes");
    }

    #[test]
    fn unknown_category_is_absent() {
        assert!(CategoryTable::default().get("intro").is_none());
    }
}
