//! Development passthrough: serve straight from disk.
//!
//! Every call re-reads and re-compresses the file. Nothing is cached, so
//! edits show up immediately; this is not a production serving path.

use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{Asset, Origin};
use crate::asset::{compress_bytes, content_type, mime::types};

/// Resolver reading from a base directory.
#[derive(Debug, Clone)]
pub struct DevAssets {
    base: PathBuf,
}

impl DevAssets {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `path` from disk. Never fails.
    ///
    /// `/`, missing files, directories and paths escaping the base all
    /// substitute `index.html`; if that is missing too, a gzip-encoded
    /// "File Not Found" page with an empty fingerprint is returned.
    pub fn resolve(&self, path: &str) -> Asset<'static> {
        let index = self.base.join("index.html");

        let requested = if path == "/" {
            None
        } else {
            self.local_path(path)
        };

        let hit = requested.and_then(|file| fs::read(&file).ok().map(|data| (file, data)));
        let (file, data, origin) = match hit {
            Some((file, data)) => (file, data, Origin::Found),
            None => match fs::read(&index) {
                Ok(data) => {
                    let origin = if path == "/" {
                        Origin::Found
                    } else {
                        Origin::Fallback
                    };
                    (index, data, origin)
                }
                Err(_) => return not_found(&index),
            },
        };

        let Ok(compressed) = compress_bytes(&data) else {
            return not_found(&file);
        };

        Asset {
            data: Cow::Owned(compressed.payload),
            fingerprint: Cow::Owned(compressed.fingerprint.to_hex()),
            content_type: content_type(&file.to_string_lossy()),
            origin,
        }
    }

    /// Map a request path onto the base directory.
    ///
    /// Returns `None` for empty paths and anything that is not a plain
    /// sequence of names (`..`, prefixes, roots).
    fn local_path(&self, path: &str) -> Option<PathBuf> {
        let rel = Path::new(path.trim_start_matches('/'));
        if rel.as_os_str().is_empty() {
            return None;
        }
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.base.join(rel))
    }
}

fn not_found(file: &Path) -> Asset<'static> {
    let body = format!("File Not Found {}", file.display());
    let data = compress_bytes(body.as_bytes()).map_or_else(|_| body.into_bytes(), |c| c.payload);
    Asset {
        data: Cow::Owned(data),
        fingerprint: Cow::Borrowed(""),
        content_type: types::HTML,
        origin: Origin::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Fingerprint, decompress};
    use tempfile::TempDir;

    fn body(asset: &Asset<'_>) -> String {
        String::from_utf8(decompress(&asset.data).unwrap()).unwrap()
    }

    #[test]
    fn test_root_serves_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "A").unwrap();

        let asset = DevAssets::new(dir.path()).resolve("/");
        assert_eq!(asset.origin, Origin::Found);
        assert_eq!(body(&asset), "A");
        assert_eq!(asset.content_type, "text/html");
        assert_eq!(asset.fingerprint, Fingerprint::of(&asset.data).to_hex());
    }

    #[test]
    fn test_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), "body{}").unwrap();

        let asset = DevAssets::new(dir.path()).resolve("/css/site.css");
        assert_eq!(asset.origin, Origin::Found);
        assert_eq!(body(&asset), "body{}");
        assert_eq!(asset.content_type, "text/css");
    }

    #[test]
    fn test_reads_live_changes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.js");
        let dev = DevAssets::new(dir.path());

        fs::write(&file, "one").unwrap();
        let first = dev.resolve("/app.js");
        fs::write(&file, "two").unwrap();
        let second = dev.resolve("/app.js");

        assert_eq!(body(&second), "two");
        assert_ne!(first.fingerprint, second.fingerprint);
    }

    #[test]
    fn test_missing_file_falls_back_to_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "A").unwrap();

        let asset = DevAssets::new(dir.path()).resolve("/missing/route");
        assert_eq!(asset.origin, Origin::Fallback);
        assert_eq!(body(&asset), "A");
        assert_eq!(asset.content_type, "text/html");
    }

    #[test]
    fn test_traversal_falls_back_to_index() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("public");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("index.html"), "A").unwrap();
        fs::write(dir.path().join("secret.txt"), "nope").unwrap();

        let asset = DevAssets::new(&base).resolve("/../secret.txt");
        assert_eq!(asset.origin, Origin::Fallback);
        assert_eq!(body(&asset), "A");
    }

    #[test]
    fn test_missing_index_is_not_found_page() {
        let dir = TempDir::new().unwrap();

        let asset = DevAssets::new(dir.path()).resolve("/anything");
        assert_eq!(asset.origin, Origin::Missing);
        assert_eq!(asset.content_type, "text/html");
        assert!(asset.fingerprint.is_empty());
        assert!(body(&asset).starts_with("File Not Found"));
    }
}
