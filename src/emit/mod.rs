//! Artifact emitters and the pack loader.
//!
//! A baked [`AssetTable`] is persisted in one of two formats:
//!
//! | Format | Artifact                                   | Loaded                   |
//! |--------|--------------------------------------------|--------------------------|
//! | `rust` | module file with byte-array constants      | compiled into the binary |
//! | `pack` | packed binary (manifest + payloads)        | read once at startup     |

mod ident;
pub mod pack;
pub mod rust;

pub use ident::const_name;
pub use pack::{PackError, PackedAssets};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::{AssetTable, BakeError};
use crate::debug;

/// Artifact format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Rust module with byte-array constants.
    #[default]
    Rust,
    /// Packed binary loaded at startup.
    Pack,
}

impl Format {
    /// Guess the format from the output file extension (`.rs` → rust, `.pack` → pack).
    pub fn from_output(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("rs") => Some(Self::Rust),
            Some("pack") => Some(Self::Pack),
            _ => None,
        }
    }
}

/// Render `table` in `format`.
pub fn render(table: &AssetTable, format: Format, tag: Option<&str>) -> Result<Vec<u8>, BakeError> {
    match format {
        Format::Rust => rust::render(table, tag).map(String::into_bytes),
        Format::Pack => pack::render(table, tag),
    }
}

/// Render and persist `table` at `output`.
///
/// The artifact is written to a sibling temp file and renamed into place,
/// so a failed run never leaves a partial artifact behind.
pub fn write_artifact(
    table: &AssetTable,
    output: &Path,
    format: Format,
    tag: Option<&str>,
) -> Result<(), BakeError> {
    let bytes = render(table, format, tag)?;
    let write_err = |e| BakeError::Write(output.to_path_buf(), e);

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(output);
    fs::write(&tmp, &bytes).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, output) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!("bake"; "wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    output.with_file_name(name)
}
