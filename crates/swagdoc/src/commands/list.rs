//! List command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::settings;

#[derive(Debug, Deserialize)]
struct Definition {
    info: Info,
}

/// The `info` object of an OpenAPI or Swagger document.
#[derive(Debug, Deserialize, PartialEq)]
struct Info {
    title: String,
    #[serde(default)]
    version: String,
}

/// Run the list command.
pub fn run(config_path: &Path, dir: Option<PathBuf>) -> Result<()> {
    let file = settings::load(config_path)?;

    let mut builder = file.ui.to_builder();
    if let Some(dir) = dir {
        builder = builder.doc_dir(dir);
    }
    let config = builder.build();

    if config.urls.is_empty() {
        println!("No API definitions found in {}", config.doc_dir.display());
        return Ok(());
    }

    for definition in &config.urls {
        let summary = describe(&config.doc_dir, &definition.url)
            .map(|info| format!("{} {}", info.title, info.version))
            .unwrap_or_default();

        println!(
            "{:<24} {:<40} {}",
            definition.name,
            definition.url,
            summary.trim_end()
        );
    }

    Ok(())
}

/// Read the `info` block of a local definition file.
fn describe(doc_dir: &Path, url: &str) -> Option<Info> {
    if url.contains("://") || url.starts_with('/') {
        return None;
    }

    let path = doc_dir.join(url);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    let parsed: Result<Definition, String> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };

    match parsed {
        Ok(definition) => Some(definition.info),
        Err(e) => {
            tracing::debug!("Cannot parse {}: {}", path.display(), e);
            None
        }
    }
}
