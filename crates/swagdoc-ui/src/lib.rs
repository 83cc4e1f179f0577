//! Swagger UI handler for a directory of API definitions.
//!
//! Renders the page shell, initializer script and stylesheet from an immutable
//! configuration, passes definition files through from the documentation
//! directory and serves the bundled Swagger UI distribution for everything else.

pub mod assets;
pub mod config;
pub mod discovery;
pub mod error;
pub mod handler;
pub mod templates;

pub use assets::{Asset, BundledAssets};
pub use config::{
    ConfigBuilder, ConfigError, DefinitionUrl, DocExpansion, OAuthConfig, SwaggerUiConfig,
};
pub use discovery::{discover, is_definition_path, DEFINITION_EXTENSIONS};
pub use error::UiError;
pub use handler::{classify, handler, relative_path, Route, SwaggerUi};
pub use templates::{Rendered, TemplateEngine};
