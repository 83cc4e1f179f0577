//! Errors produced by the Swagger UI handler.

/// Errors that can occur while setting up or serving the UI.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to load bundled asset {path}: {message}")]
    Asset { path: String, message: String },
}
