//! Directory walking and root-relative path derivation (pure, no side effects).

use jwalk::WalkDir;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::BakeError;

/// One file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Absolute (or root-joined) filesystem path.
    pub source: PathBuf,
    /// Root-relative POSIX path with a leading `/`.
    pub path: String,
}

/// Enumerate every file under `root`, depth-first.
///
/// Children are visited in sorted order, so unchanged input always walks
/// the same way. Any directory that cannot be listed aborts the walk.
///
/// ```text
/// public/
/// ├── app.js          -> /app.js
/// ├── css/
/// │   └── site.css    -> /css/site.css
/// └── index.html      -> /index.html
/// ```
pub fn walk(root: &Path) -> Result<Vec<WalkEntry>, BakeError> {
    let meta = fs::metadata(root).map_err(|e| BakeError::Walk(root.to_path_buf(), e))?;
    if !meta.is_dir() {
        return Err(BakeError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .follow_links(true);

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"));
            BakeError::Walk(path, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.path();
        let path = relative_path(root, &source)?;
        entries.push(WalkEntry { source, path });
    }

    Ok(entries)
}

/// Strip `root` from `source` and render the rest as `/a/b/c`.
pub fn relative_path(root: &Path, source: &Path) -> Result<String, BakeError> {
    let rel = source.strip_prefix(root).unwrap_or(source);

    let mut path = String::new();
    for component in rel.components() {
        let Component::Normal(name) = component else {
            continue;
        };
        let name = name
            .to_str()
            .ok_or_else(|| BakeError::NonUtf8Path(source.to_path_buf()))?;
        path.push('/');
        path.push_str(name);
    }

    if path.is_empty() {
        path.push('/');
    }
    Ok(path)
}
