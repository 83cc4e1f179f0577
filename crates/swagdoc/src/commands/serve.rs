//! Serve command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use swagdoc_ui::SwaggerUi;
use tower_http::trace::TraceLayer;

use crate::settings;

/// Flags overriding the config file for a single run.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Documentation directory holding the API definitions
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// URL path prefix the UI is served under
    #[arg(long)]
    pub prefix: Option<String>,

    /// Browser page title
    #[arg(long)]
    pub title: Option<String>,

    /// Serve index.html from the documentation directory instead of the template
    #[arg(long)]
    pub no_index_template: bool,

    /// Do not open browser
    #[arg(long)]
    pub no_open: bool,
}

/// Run the serve command.
pub async fn run(config_path: &Path, args: ServeArgs) -> Result<()> {
    let file = settings::load(config_path)?;

    let mut builder = file.ui.to_builder();
    if let Some(dir) = args.dir {
        builder = builder.doc_dir(dir);
    }
    if let Some(prefix) = args.prefix {
        builder = builder.path_prefix(prefix);
    }
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if args.no_index_template {
        builder = builder.index_template(false);
    }

    let ui = SwaggerUi::new(builder.build()).context("Failed to set up Swagger UI")?;

    let config = ui.config();
    if config.urls.is_empty() {
        tracing::warn!(
            "No API definitions found in {}",
            config.doc_dir.display()
        );
    }
    for definition in &config.urls {
        tracing::debug!("Definition {} -> {}", definition.name, definition.url);
    }

    let host = args.host.unwrap_or(file.server.host);
    let port = args.port.unwrap_or(file.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid address")?;

    let url = ui_url(addr, &config.path_prefix);
    let app = ui.into_router().layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving Swagger UI at {}", url);

    if file.server.open && !args.no_open {
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Browser URL of the UI root.
fn ui_url(addr: SocketAddr, prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("http://{}/", addr)
    } else {
        format!("http://{}/{}/", addr, prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_ui_url_from_prefix() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();

        assert_eq!(ui_url(addr, ""), "http://127.0.0.1:8080/");
        assert_eq!(ui_url(addr, "/"), "http://127.0.0.1:8080/");
        assert_eq!(ui_url(addr, "/swagger"), "http://127.0.0.1:8080/swagger/");
        assert_eq!(ui_url(addr, "api/docs/"), "http://127.0.0.1:8080/api/docs/");
    }
}
