//! Bundled Swagger UI distribution.
//!
//! The files are compiled into the binary by `utoipa-swagger-ui` and served as
//! opaque, read-only bytes.

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::UiError;

/// A bundled file ready to be served.
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Cow<'static, [u8]>,
    pub content_type: String,
}

/// The Swagger UI asset collection shipped with this crate.
#[derive(Clone)]
pub struct BundledAssets {
    config: Arc<utoipa_swagger_ui::Config<'static>>,
}

impl BundledAssets {
    pub fn new() -> Self {
        Self {
            config: Arc::new(utoipa_swagger_ui::Config::default()),
        }
    }

    /// Look up a bundled file by its path relative to the distribution root.
    ///
    /// Returns `Ok(None)` when no such file is bundled.
    pub fn get(&self, path: &str) -> Result<Option<Asset>, UiError> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Ok(None);
        }

        let file = utoipa_swagger_ui::serve(path, Arc::clone(&self.config)).map_err(|e| {
            UiError::Asset {
                path: path.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(file.map(|file| Asset {
            bytes: file.bytes,
            content_type: file.content_type,
        }))
    }
}

impl Default for BundledAssets {
    fn default() -> Self {
        Self::new()
    }
}
