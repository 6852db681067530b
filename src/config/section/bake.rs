//! `[bake]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bake]
//! input = "web/dist"          # Directory to embed
//! output = "src/assets.rs"    # Artifact path
//! tag = "embed"               # Gate the generated module behind a cargo feature
//! format = "rust"             # "rust" (module file) or "pack" (packed binary)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::emit::Format;

/// Generator settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Source root to walk.
    pub input: Option<PathBuf>,

    /// Artifact destination.
    pub output: Option<PathBuf>,

    /// Cargo feature the generated module is gated behind.
    pub tag: Option<String>,

    /// Artifact format. Inferred from the output extension when unset.
    pub format: Option<Format>,
}

impl BakeConfig {
    /// Effective format: explicit, else by extension, else Rust.
    pub fn format(&self) -> Format {
        self.format
            .or_else(|| self.output.as_deref().and_then(Format::from_output))
            .unwrap_or_default()
    }
}

/// Whether `tag` can be used as a cargo feature name.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+' || c == '.')
}
