//! Preview server command.
//!
//! Pages fetch their Markdown with relative URLs, so the whole site root is
//! served rather than just the output directory.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use walkdir::WalkDir;

use crate::config::load_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, open_browser: bool) -> Result<()> {
    let config = load_config(config_path)?.into_build_config(None);

    let output = config.site_root.join(&config.output_dir);
    if !output.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'docshell build' first.",
            output.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}", config.site_root.display(), addr);

    let app = Router::new().fallback_service(ServeDir::new(&config.site_root));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    if open_browser {
        let url = format!(
            "http://{}{}",
            addr,
            landing_path(&config.site_root, &config.output_dir)
        );
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// URL path to open first.
///
/// The site root when it has an `index.html`, otherwise the first generated
/// page in sorted order. `ServeDir` does not list directories.
fn landing_path(site_root: &Path, output_dir: &str) -> String {
    if site_root.join("index.html").is_file() {
        return "/".to_string();
    }

    let first_page = WalkDir::new(site_root.join(output_dir))
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "html")
        });

    let Some(page) = first_page else {
        return "/".to_string();
    };

    match page.path().strip_prefix(site_root) {
        Ok(relative) => {
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            format!("/{}", segments.join("/"))
        }
        Err(_) => "/".to_string(),
    }
}
