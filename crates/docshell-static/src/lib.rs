//! Static HTML shell generator for Markdown documentation.
//!
//! Walks a docs tree, maps every Markdown file to an output page, and writes an
//! HTML shell that fetches and renders the Markdown in the browser.

pub mod builder;
pub mod config;
pub mod discovery;
pub mod emitter;
pub mod frontmatter;
pub mod mapper;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, Collision, StaticBuilder};
pub use config::{CategoryRule, CategoryTable, Link, SidebarSection};
pub use discovery::{discover, DocPath};
pub use frontmatter::strip_front_matter;
pub use mapper::{derive_title, OutputLocation, PathMapper};
