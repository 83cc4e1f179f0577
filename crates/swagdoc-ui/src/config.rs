//! Swagger UI configuration.
//!
//! A [`SwaggerUiConfig`] is assembled once through a [`ConfigBuilder`] and then
//! shared read-only by every request. It doubles as the render context for the
//! page templates, so field names here are the names templates see.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::discovery;

/// Errors raised while interpreting configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid doc expansion '{0}', expected one of: list, full, none")]
    InvalidDocExpansion(String),
}

/// How operations and tags are expanded when the UI first loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Expand tags only
    #[default]
    List,
    /// Expand tags and operations
    Full,
    /// Expand nothing
    None,
}

impl DocExpansion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocExpansion::List => "list",
            DocExpansion::Full => "full",
            DocExpansion::None => "none",
        }
    }
}

impl fmt::Display for DocExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocExpansion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(DocExpansion::List),
            "full" => Ok(DocExpansion::Full),
            "none" => Ok(DocExpansion::None),
            other => Err(ConfigError::InvalidDocExpansion(other.to_string())),
        }
    }
}

/// A named pointer to an API definition document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionUrl {
    /// Display name in the definition selector
    #[serde(default)]
    pub name: String,

    /// URL the UI fetches the definition from
    pub url: String,
}

impl DefinitionUrl {
    /// Entry without a display name. The name falls back to the URL when the
    /// configuration is built.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            url: url.into(),
        }
    }

    pub fn named(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// OAuth2 settings passed to `ui.initOAuth`.
///
/// See <https://swagger.io/docs/open-source-tools/swagger-ui/usage/oauth2/>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Client id sent to the OAuth2 provider
    pub client_id: String,

    /// Realm the client operates in, empty if not applicable
    #[serde(default)]
    pub realm: String,

    /// Application name shown in the authorization popup
    #[serde(default)]
    pub app_name: String,
}

/// Configuration for the Swagger UI handler.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerUiConfig {
    /// Browser page title
    pub title: String,

    /// Directory holding the API definition files
    #[serde(skip_serializing)]
    pub doc_dir: PathBuf,

    /// URL path the handler is mounted under
    pub path_prefix: String,

    /// Render the index page from the template instead of serving it from `doc_dir`
    pub index_template: bool,

    /// API definitions offered by the UI
    pub urls: Vec<DefinitionUrl>,

    pub doc_expansion: DocExpansion,
    pub show_extensions: bool,

    /// Id of the element the UI mounts into
    pub dom_id: String,

    pub deep_linking: bool,

    /// Keep authorization data across browser close/refresh
    pub persist_authorization: bool,

    pub syntax_highlight: bool,

    pub oauth: Option<OAuthConfig>,
}

impl Default for SwaggerUiConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            doc_dir: PathBuf::from("docs"),
            path_prefix: String::new(),
            index_template: true,
            urls: Vec::new(),
            doc_expansion: DocExpansion::List,
            show_extensions: true,
            dom_id: "swagger-ui".to_string(),
            deep_linking: true,
            persist_authorization: false,
            syntax_highlight: true,
            oauth: None,
        }
    }
}

impl SwaggerUiConfig {
    /// Start a builder pre-populated with defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Applies options in call order, then finalizes into a [`SwaggerUiConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: SwaggerUiConfig,
}

impl ConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn doc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.doc_dir = dir.into();
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.path_prefix = prefix.into();
        self
    }

    pub fn index_template(mut self, enabled: bool) -> Self {
        self.config.index_template = enabled;
        self
    }

    /// Add a definition URL named after itself.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.urls.push(DefinitionUrl::named(url.clone(), url));
        self
    }

    pub fn definition_url(mut self, definition: DefinitionUrl) -> Self {
        self.config.urls.push(definition);
        self
    }

    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.config.doc_expansion = expansion;
        self
    }

    pub fn show_extensions(mut self, show: bool) -> Self {
        self.config.show_extensions = show;
        self
    }

    pub fn dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.config.dom_id = dom_id.into();
        self
    }

    pub fn deep_linking(mut self, enabled: bool) -> Self {
        self.config.deep_linking = enabled;
        self
    }

    pub fn persist_authorization(mut self, enabled: bool) -> Self {
        self.config.persist_authorization = enabled;
        self
    }

    pub fn syntax_highlight(mut self, enabled: bool) -> Self {
        self.config.syntax_highlight = enabled;
        self
    }

    pub fn oauth(mut self, oauth: OAuthConfig) -> Self {
        self.config.oauth = Some(oauth);
        self
    }

    /// Apply an arbitrary option to the configuration being built.
    pub fn apply<F>(mut self, option: F) -> Self
    where
        F: FnOnce(&mut SwaggerUiConfig),
    {
        option(&mut self.config);
        self
    }

    /// Finalize the configuration.
    ///
    /// Unnamed definition URLs are named after their URL. When no definition
    /// URLs were configured, `doc_dir` is scanned for definition files.
    pub fn build(self) -> SwaggerUiConfig {
        let mut config = self.config;

        for definition in &mut config.urls {
            if definition.name.is_empty() {
                definition.name = definition.url.clone();
            }
        }

        if config.urls.is_empty() {
            config.urls = discovery::discover(&config.doc_dir);
            tracing::info!(
                "Discovered {} API definitions in {}",
                config.urls.len(),
                config.doc_dir.display()
            );
        }

        config
    }
}
