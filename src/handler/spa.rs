//! Path resolution for the single-page-application responder.
//!
//! Every request resolves against the site root with a single existence
//! check: an existing file is served as-is, anything else resolves to the
//! root document so client-side routing can take over.

use std::path::{Component, Path, PathBuf};

use crate::config::SiteConfig;
use crate::logger;

/// What a request path resolved to on disk.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The requested path names an existing file under the root.
    File(PathBuf),
    /// The requested path is absent; the root document is served instead.
    Fallback(PathBuf),
    /// Neither the requested path nor the root document exists.
    Missing,
}

/// Resolve a URL path against the site root.
///
/// The existence check is the entire routing decision. Directory hits are
/// answered by their own index file when one exists; everything else falls
/// back to the root document.
pub fn resolve(site: &SiteConfig, url_path: &str) -> Resolution {
    let root = Path::new(&site.root);

    if let Some(relative) = sanitize(url_path) {
        let candidate = root.join(&relative);
        if candidate.is_file() && within_root(root, &candidate) {
            return Resolution::File(candidate);
        }
        if candidate.is_dir() {
            let index = candidate.join(&site.index);
            if index.is_file() && within_root(root, &index) {
                return Resolution::File(index);
            }
        }
    } else {
        logger::log_warning(&format!(
            "Rejected parent-directory component in request path: {url_path}"
        ));
    }

    let fallback = root.join(&site.index);
    if fallback.is_file() {
        Resolution::Fallback(fallback)
    } else {
        Resolution::Missing
    }
}

/// Reduce a URL path to a safe relative path.
///
/// Only `Normal` components survive; any parent-directory component rejects
/// the whole path, so a request can never name a file above the site root.
fn sanitize(url_path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(url_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::ParentDir => return None,
            Component::CurDir | Component::Prefix(_) | Component::RootDir => {}
        }
    }
    Some(clean)
}

/// Canonicalized containment check. A candidate whose canonical path leaves
/// the canonical root (e.g. through a symlink) is refused.
fn within_root(root: &Path, candidate: &Path) -> bool {
    let Ok(root) = root.canonicalize() else {
        return false;
    };
    let Ok(candidate) = candidate.canonicalize() else {
        return false;
    };
    candidate.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site(root: &Path) -> SiteConfig {
        SiteConfig {
            root: root.to_str().unwrap().to_string(),
            index: "index.html".to_string(),
        }
    }

    fn populated_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.html"), "docs").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        dir
    }

    #[test]
    fn test_existing_file_is_served() {
        let dir = populated_root();
        let site = site(dir.path());
        assert_eq!(
            resolve(&site, "/app.js"),
            Resolution::File(dir.path().join("app.js"))
        );
    }

    #[test]
    fn test_missing_path_falls_back_to_root_document() {
        let dir = populated_root();
        let site = site(dir.path());
        assert_eq!(
            resolve(&site, "/settings/profile"),
            Resolution::Fallback(dir.path().join("index.html"))
        );
    }

    #[test]
    fn test_root_serves_index() {
        let dir = populated_root();
        let site = site(dir.path());
        assert_eq!(
            resolve(&site, "/"),
            Resolution::File(dir.path().join("index.html"))
        );
    }

    #[test]
    fn test_directory_with_index() {
        let dir = populated_root();
        let site = site(dir.path());
        assert_eq!(
            resolve(&site, "/docs/"),
            Resolution::File(dir.path().join("docs/index.html"))
        );
    }

    #[test]
    fn test_directory_without_index_falls_back() {
        let dir = populated_root();
        let site = site(dir.path());
        assert_eq!(
            resolve(&site, "/empty"),
            Resolution::Fallback(dir.path().join("index.html"))
        );
    }

    #[test]
    fn test_traversal_is_rejected() {
        // A real file one level above the root must stay unreachable.
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("index.html"), "<html>app</html>").unwrap();
        fs::write(dir.path().join("outside.txt"), "secret").unwrap();
        let site = site(&root);
        assert_eq!(
            resolve(&site, "/../outside.txt"),
            Resolution::Fallback(root.join("index.html"))
        );
    }

    #[test]
    fn test_missing_root_document() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        assert_eq!(resolve(&site, "/anything"), Resolution::Missing);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("/a/b.js"), Some(PathBuf::from("a/b.js")));
        assert_eq!(sanitize("/"), Some(PathBuf::new()));
        assert_eq!(sanitize("/./a"), Some(PathBuf::from("a")));
        assert_eq!(sanitize("/a/../b"), None);
        assert_eq!(sanitize("/.."), None);
    }
}
