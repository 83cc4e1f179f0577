//! Configuration file (`swagdoc.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use swagdoc_ui::{ConfigBuilder, DefinitionUrl, DocExpansion, OAuthConfig, SwaggerUiConfig};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Open a browser once the server is listening
    #[serde(default = "default_open")]
    pub open: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open: default_open(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_open() -> bool {
    true
}

/// `[ui]` table. Unset keys keep the handler defaults.
#[derive(Debug, Deserialize, Default)]
pub struct UiSettings {
    pub title: Option<String>,
    pub doc_dir: Option<PathBuf>,
    pub path_prefix: Option<String>,
    pub index_template: Option<bool>,
    pub doc_expansion: Option<DocExpansion>,
    pub show_extensions: Option<bool>,
    pub dom_id: Option<String>,
    pub deep_linking: Option<bool>,
    pub persist_authorization: Option<bool>,
    pub syntax_highlight: Option<bool>,
    #[serde(default)]
    pub urls: Vec<DefinitionUrl>,
    pub oauth: Option<OAuthConfig>,
}

impl UiSettings {
    /// Start a handler configuration from these settings.
    pub fn to_builder(&self) -> ConfigBuilder {
        let mut builder = SwaggerUiConfig::builder();

        if let Some(title) = &self.title {
            builder = builder.title(title);
        }
        if let Some(dir) = &self.doc_dir {
            builder = builder.doc_dir(dir);
        }
        if let Some(prefix) = &self.path_prefix {
            builder = builder.path_prefix(prefix);
        }
        if let Some(enabled) = self.index_template {
            builder = builder.index_template(enabled);
        }
        if let Some(expansion) = self.doc_expansion {
            builder = builder.doc_expansion(expansion);
        }
        if let Some(show) = self.show_extensions {
            builder = builder.show_extensions(show);
        }
        if let Some(dom_id) = &self.dom_id {
            builder = builder.dom_id(dom_id);
        }
        if let Some(enabled) = self.deep_linking {
            builder = builder.deep_linking(enabled);
        }
        if let Some(enabled) = self.persist_authorization {
            builder = builder.persist_authorization(enabled);
        }
        if let Some(enabled) = self.syntax_highlight {
            builder = builder.syntax_highlight(enabled);
        }
        for url in &self.urls {
            builder = builder.definition_url(url.clone());
        }
        if let Some(oauth) = &self.oauth {
            builder = builder.oauth(oauth.clone());
        }

        builder
    }
}

/// Load the configuration file if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
