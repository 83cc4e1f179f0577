//! Discovery of API definition files in the documentation directory.
//!
//! The documentation directory is walked in file-name order without following
//! links. Each symlink met on the way is resolved exactly once and its target
//! walked in place, again without following links. A link back to the
//! documentation directory or one of its ancestors is not walked.

use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DefinitionUrl;

/// File extensions recognized as API definitions.
pub const DEFINITION_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Whether a path names an API definition file.
pub fn is_definition_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext))
}

/// Find every definition file under `doc_dir`.
///
/// Entries are named by their base file name and point at their path relative
/// to `doc_dir`. A file reachable both directly and through a link is listed
/// under both paths. Errors are logged and skipped.
pub fn discover(doc_dir: &Path) -> Vec<DefinitionUrl> {
    if !doc_dir.is_dir() {
        tracing::warn!(
            "Documentation directory not found: {}",
            doc_dir.display()
        );
        return Vec::new();
    }

    let mut found = Found {
        root: fs::canonicalize(doc_dir).unwrap_or_else(|_| doc_dir.to_path_buf()),
        urls: Vec::new(),
    };

    for entry in WalkDir::new(doc_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(doc_dir) else {
            continue;
        };

        if entry.path_is_symlink() && entry.depth() > 0 {
            found.add_link(entry.path(), relative);
        } else if entry.file_type().is_file() {
            found.add(relative);
        }
    }

    found.urls
}

/// Accumulates discovered definitions.
struct Found {
    /// Canonical documentation directory
    root: PathBuf,
    urls: Vec<DefinitionUrl>,
}

impl Found {
    fn add(&mut self, relative: &Path) {
        if !is_definition_path(relative) {
            return;
        }

        let Some(url) = url_path(relative) else {
            tracing::debug!("Skipping non UTF-8 path: {}", relative.display());
            return;
        };

        let name = relative
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&url)
            .to_string();

        self.urls.push(DefinitionUrl { name, url });
    }

    /// Resolve one symlink hop and collect what it points at under the
    /// link's own relative path.
    fn add_link(&mut self, link: &Path, relative: &Path) {
        let target = match fs::read_link(link) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!("Failed to read link {}: {}", link.display(), e);
                return;
            }
        };

        let target = match link.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target,
        };

        let metadata = match fs::metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Broken link {} -> {}: {}", link.display(), target.display(), e);
                return;
            }
        };

        if metadata.is_file() {
            self.add(relative);
            return;
        }

        // The documentation directory is already being walked.
        if let Ok(canonical) = fs::canonicalize(&target) {
            if self.root.starts_with(&canonical) {
                tracing::debug!(
                    "Not walking {}: it contains the documentation directory",
                    link.display()
                );
                return;
            }
        }

        for entry in WalkDir::new(&target).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                if entry.path_is_symlink() {
                    tracing::debug!("Not following nested link: {}", entry.path().display());
                }
                continue;
            }

            if let Ok(inner) = entry.path().strip_prefix(&target) {
                self.add(&relative.join(inner));
            }
        }
    }
}

/// Join path components with `/`, failing on non UTF-8 names.
fn url_path(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_str()?);
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn urls(found: &[DefinitionUrl]) -> Vec<(&str, &str)> {
        found
            .iter()
            .map(|d| (d.name.as_str(), d.url.as_str()))
            .collect()
    }

    #[test]
    fn recognizes_definition_extensions() {
        assert!(is_definition_path("openapi.json"));
        assert!(is_definition_path("v1/openapi.yaml"));
        assert!(is_definition_path("spec.yml"));
        assert!(!is_definition_path("notes.txt"));
        assert!(!is_definition_path("swagger-ui.css"));
        assert!(!is_definition_path("json"));
    }

    #[test]
    fn finds_only_definition_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), "{}").unwrap();
        fs::write(temp.path().join("b.yaml"), "openapi: 3.0.0").unwrap();
        fs::write(temp.path().join("c.txt"), "notes").unwrap();

        let found = discover(temp.path());

        assert_eq!(urls(&found), vec![("a.json", "a.json"), ("b.yaml", "b.yaml")]);
    }

    #[test]
    fn nested_files_use_relative_urls() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("v1")).unwrap();
        fs::create_dir_all(temp.path().join("v2")).unwrap();
        fs::write(temp.path().join("v1/api.yml"), "openapi: 3.0.0").unwrap();
        fs::write(temp.path().join("v2/api.json"), "{}").unwrap();

        let found = discover(temp.path());

        assert_eq!(
            urls(&found),
            vec![("api.yml", "v1/api.yml"), ("api.json", "v2/api.json")]
        );
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let temp = tempdir().unwrap();
        assert!(discover(&temp.path().join("absent")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn follows_directory_link_once() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let shared = temp.path().join("shared");
        fs::create_dir_all(&docs).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("billing.yaml"), "openapi: 3.0.0").unwrap();
        symlink(&shared, docs.join("shared")).unwrap();

        let found = discover(&docs);

        assert_eq!(urls(&found), vec![("billing.yaml", "shared/billing.yaml")]);
    }

    #[cfg(unix)]
    #[test]
    fn relative_file_link_resolves_against_its_directory() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(temp.path().join("openapi.json"), "{}").unwrap();
        symlink("../openapi.json", docs.join("public.json")).unwrap();

        let found = discover(&docs);

        assert_eq!(urls(&found), vec![("public.json", "public.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn lists_links_next_to_their_targets() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("v2")).unwrap();
        fs::write(docs.join("v1.json"), "{}").unwrap();
        fs::write(docs.join("v2/api.json"), "{}").unwrap();
        symlink("v1.json", docs.join("latest.json")).unwrap();
        symlink("v2", docs.join("current")).unwrap();

        let found = discover(&docs);

        assert_eq!(
            urls(&found),
            vec![
                ("api.json", "current/api.json"),
                ("latest.json", "latest.json"),
                ("v1.json", "v1.json"),
                ("api.json", "v2/api.json"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn link_to_doc_dir_is_not_walked() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("api.json"), "{}").unwrap();
        symlink(&docs, docs.join("loop")).unwrap();
        symlink("..", docs.join("parent")).unwrap();

        let found = discover(&docs);

        assert_eq!(urls(&found), vec![("api.json", "api.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn broken_link_is_skipped() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), "{}").unwrap();
        symlink(temp.path().join("gone"), temp.path().join("b.json")).unwrap();

        let found = discover(temp.path());

        assert_eq!(urls(&found), vec![("a.json", "a.json")]);
    }
}
