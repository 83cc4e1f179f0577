//! Request dispatch for the Swagger UI handler.
//!
//! Every GET request is classified by its path relative to the configured
//! prefix and answered by one of the templates, the documentation directory or
//! the bundled asset collection.

use std::fs;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::assets::BundledAssets;
use crate::config::{ConfigBuilder, SwaggerUiConfig};
use crate::discovery::is_definition_path;
use crate::error::UiError;
use crate::templates::{
    Rendered, TemplateEngine, INDEX_TEMPLATE_NAME, INITIALIZER_TEMPLATE_NAME,
    STYLESHEET_TEMPLATE_NAME,
};

const HTML: &str = "text/html; charset=utf-8";
const JAVASCRIPT: &str = "application/javascript; charset=utf-8";
const CSS: &str = "text/css; charset=utf-8";

/// What a request path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The page shell
    Index,
    /// `swagger-initializer.js`
    Initializer,
    /// `index.css`
    Stylesheet,
    /// A definition file in the documentation directory
    Definition,
    /// Anything else, looked up in the bundled assets
    Asset,
}

/// Classify a path relative to the handler prefix.
pub fn classify(relative: &str) -> Route {
    match relative {
        "" | "index" | "index.html" => Route::Index,
        "swagger-initializer.js" => Route::Initializer,
        "index.css" => Route::Stylesheet,
        path if is_definition_path(path) => Route::Definition,
        _ => Route::Asset,
    }
}

/// Strip the handler prefix and any leading slashes from a request path.
///
/// The prefix is normalized to a single leading slash and no trailing slash,
/// and only matches whole path segments. A path outside the prefix is kept
/// whole.
pub fn relative_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return path.trim_start_matches('/');
    }

    let prefix = format!("/{prefix}");
    match path.strip_prefix(prefix.as_str()) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => path.trim_start_matches('/'),
    }
}

/// The Swagger UI handler.
pub struct SwaggerUi {
    config: Arc<SwaggerUiConfig>,
    templates: TemplateEngine,
    docs: ServeDir,
    assets: BundledAssets,
}

impl SwaggerUi {
    pub fn new(config: SwaggerUiConfig) -> Result<Self, UiError> {
        let docs = ServeDir::new(&config.doc_dir);

        Ok(Self {
            config: Arc::new(config),
            templates: TemplateEngine::new()?,
            docs,
            assets: BundledAssets::new(),
        })
    }

    pub fn config(&self) -> &SwaggerUiConfig {
        &self.config
    }

    /// Router answering every path with this handler.
    ///
    /// The dispatcher sees full request paths, so the router can be merged
    /// into a host router as is.
    pub fn into_router(self) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(self))
    }

    /// Answer a single request.
    pub async fn handle(&self, req: Request) -> Response {
        if req.method() != Method::GET {
            return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
        }

        let relative = relative_path(req.uri().path(), &self.config.path_prefix).to_string();
        let route = classify(&relative);
        tracing::debug!("{} -> {:?}", req.uri().path(), route);

        match route {
            Route::Index if self.config.index_template => respond(
                INDEX_TEMPLATE_NAME,
                self.templates.render_index(&self.config),
                HTML,
            ),
            Route::Index => self.serve_raw_index(req).await,
            Route::Initializer => respond(
                INITIALIZER_TEMPLATE_NAME,
                self.templates.render_initializer(&self.config),
                JAVASCRIPT,
            ),
            Route::Stylesheet => respond(
                STYLESHEET_TEMPLATE_NAME,
                self.templates.render_stylesheet(&self.config),
                CSS,
            ),
            Route::Definition => self.serve_doc(req, &format!("/{relative}")).await,
            Route::Asset => self.serve_asset(&relative),
        }
    }

    /// Serve the documentation directory's own index, or list its entries
    /// when it has none.
    async fn serve_raw_index(&self, req: Request) -> Response {
        if self.config.doc_dir.join("index.html").is_file() {
            return self.serve_doc(req, "/").await;
        }

        let mut entries = match fs::read_dir(&self.config.doc_dir) {
            Ok(dir) => dir
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let name = e.file_name().to_str()?.to_string();
                    let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    Some(if is_dir { format!("{name}/") } else { name })
                })
                .collect::<Vec<_>>(),
            Err(e) => {
                tracing::warn!(
                    "Failed to list {}: {}",
                    self.config.doc_dir.display(),
                    e
                );
                return not_found();
            }
        };
        entries.sort();

        respond("listing", self.templates.render_listing(&entries), HTML)
    }

    /// Serve `path` from the documentation directory.
    async fn serve_doc(&self, req: Request, path: &str) -> Response {
        let (mut parts, body) = req.into_parts();

        let target = match parts.uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };

        parts.uri = match target.parse::<Uri>() {
            Ok(uri) => uri,
            Err(e) => {
                tracing::debug!("Rejecting path {}: {}", target, e);
                return StatusCode::BAD_REQUEST.into_response();
            }
        };

        match self.docs.clone().oneshot(Request::from_parts(parts, body)).await {
            Ok(res) => res.map(Body::new),
            Err(never) => match never {},
        }
    }

    fn serve_asset(&self, path: &str) -> Response {
        match self.assets.get(path) {
            Ok(Some(asset)) => {
                ([(header::CONTENT_TYPE, asset.content_type)], asset.bytes).into_response()
            }
            Ok(None) => not_found(),
            Err(e) => {
                tracing::error!("{}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Build a router for the Swagger UI from a configuration builder.
pub fn handler(builder: ConfigBuilder) -> Result<Router, UiError> {
    Ok(SwaggerUi::new(builder.build())?.into_router())
}

async fn dispatch(State(ui): State<Arc<SwaggerUi>>, req: Request) -> Response {
    ui.handle(req).await
}

/// Serve rendered output even when rendering failed part way.
fn respond(name: &str, rendered: Rendered, content_type: &'static str) -> Response {
    if let Some(e) = rendered.error {
        tracing::error!("Failed to render {}: {:#}", name, e);
    }

    ([(header::CONTENT_TYPE, content_type)], rendered.body).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}
