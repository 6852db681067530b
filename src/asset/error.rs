//! Generation error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a bake run.
///
/// Every variant is fatal: a run that hits one produces no artifact.
#[derive(Debug, Error)]
pub enum BakeError {
    #[error("cannot list `{0}`")]
    Walk(PathBuf, #[source] std::io::Error),

    #[error("input root `{0}` is not a directory")]
    NotADirectory(PathBuf),

    #[error("path `{0}` is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("cannot read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("cannot compress `{0}`")]
    Compress(PathBuf, #[source] std::io::Error),

    #[error("duplicate asset path `{0}`")]
    DuplicatePath(String),

    #[error("cannot serialize pack manifest")]
    Manifest(#[from] serde_json::Error),

    #[error("pack manifest is too large ({0} bytes)")]
    ManifestTooLarge(usize),

    #[error("cannot write artifact `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_bake_error_display() {
        let err = BakeError::Walk(
            PathBuf::from("public/img"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(format!("{err}").contains("public/img"));

        let err = BakeError::DuplicatePath("/app.js".into());
        assert!(format!("{err}").contains("/app.js"));
    }
}
