//! Packed binary artifact: one file holding a JSON manifest and every payload.
//!
//! # Layout
//!
//! ```text
//! +--------+---------+--------------+-----------------+-----------------+
//! | "ABPK" | version | manifest len | manifest (JSON) | payloads ...    |
//! | 4 B    | 1 B     | u32 LE       | len bytes       | concatenated    |
//! +--------+---------+--------------+-----------------+-----------------+
//! ```
//!
//! Offsets in the manifest are relative to the start of the payload region.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::asset::{AssetRecord, AssetTable, BakeError, Compressed, Fingerprint};
use crate::resolve::{Asset, Catalog};

pub const MAGIC: [u8; 4] = *b"ABPK";
pub const VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1 + 4;

/// Errors raised while loading a pack.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("cannot read pack `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("not an asset pack (bad magic)")]
    BadMagic,

    #[error("unsupported pack version {0}")]
    UnsupportedVersion(u8),

    #[error("pack is truncated")]
    Truncated,

    #[error("invalid pack manifest")]
    Manifest(#[from] serde_json::Error),

    #[error("payload of `{0}` lies outside the pack")]
    OutOfBounds(String),

    #[error("fingerprint of `{0}` does not match its payload")]
    FingerprintMismatch(String),

    #[error("invalid fallback token")]
    BadToken,

    #[error(transparent)]
    Table(#[from] BakeError),
}

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    fallback_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestEntry {
    path: String,
    fingerprint: String,
    offset: u64,
    len: u64,
}

/// Serialize `table` into pack bytes.
pub fn render(table: &AssetTable, tag: Option<&str>) -> Result<Vec<u8>, BakeError> {
    let mut offset = 0u64;
    let entries = table
        .iter()
        .map(|record| {
            let len = record.payload.len() as u64;
            let entry = ManifestEntry {
                path: record.path.clone(),
                fingerprint: record.fingerprint.to_hex(),
                offset,
                len,
            };
            offset += len;
            entry
        })
        .collect();

    let manifest = serde_json::to_vec(&Manifest {
        fallback_token: table.fallback_token().to_hex(),
        tag: tag.map(str::to_string),
        entries,
    })?;
    let manifest_len =
        u32::try_from(manifest.len()).map_err(|_| BakeError::ManifestTooLarge(manifest.len()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + manifest.len() + table.payload_bytes());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&manifest_len.to_le_bytes());
    out.extend_from_slice(&manifest);
    for record in table.iter() {
        out.extend_from_slice(&record.payload);
    }
    Ok(out)
}

/// An asset table loaded from a pack at startup.
#[derive(Debug, Clone)]
pub struct PackedAssets {
    table: AssetTable,
    tag: Option<String>,
}

impl PackedAssets {
    pub fn open(path: &Path) -> Result<Self, PackError> {
        let bytes = fs::read(path).map_err(|e| PackError::Io(path.to_path_buf(), e))?;
        Self::from_bytes(&bytes)
    }

    /// Parse and validate pack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PackError> {
        if bytes.len() < HEADER_LEN {
            return Err(PackError::Truncated);
        }
        if bytes[..MAGIC.len()] != MAGIC {
            return Err(PackError::BadMagic);
        }
        let version = bytes[MAGIC.len()];
        if version != VERSION {
            return Err(PackError::UnsupportedVersion(version));
        }

        let mut len = [0u8; 4];
        len.copy_from_slice(&bytes[MAGIC.len() + 1..HEADER_LEN]);
        let manifest_end = HEADER_LEN
            .checked_add(u32::from_le_bytes(len) as usize)
            .filter(|end| *end <= bytes.len())
            .ok_or(PackError::Truncated)?;

        let manifest: Manifest = serde_json::from_slice(&bytes[HEADER_LEN..manifest_end])?;
        let payloads = &bytes[manifest_end..];

        let records = manifest
            .entries
            .into_iter()
            .map(|entry| {
                let payload = slice(payloads, entry.offset, entry.len)
                    .ok_or_else(|| PackError::OutOfBounds(entry.path.clone()))?;
                let fingerprint = Fingerprint::of(payload);
                if fingerprint.to_hex() != entry.fingerprint {
                    return Err(PackError::FingerprintMismatch(entry.path));
                }
                Ok(AssetRecord::new(
                    entry.path,
                    Compressed {
                        payload: payload.to_vec(),
                        fingerprint,
                    },
                ))
            })
            .collect::<Result<Vec<_>, PackError>>()?;

        let token = Fingerprint::from_hex(&manifest.fallback_token).ok_or(PackError::BadToken)?;
        let table = AssetTable::from_records(records, token)?;

        Ok(Self {
            table,
            tag: manifest.tag,
        })
    }

    pub fn table(&self) -> &AssetTable {
        &self.table
    }

    pub fn into_table(self) -> AssetTable {
        self.table
    }

    /// Tag recorded at bake time, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl Catalog for PackedAssets {
    fn get(&self, path: &str) -> Option<Asset<'_>> {
        Catalog::get(&self.table, path)
    }

    fn fallback_token(&self) -> Cow<'_, str> {
        Catalog::fallback_token(&self.table)
    }
}

fn slice(data: &[u8], offset: u64, len: u64) -> Option<&[u8]> {
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    data.get(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{compress_bytes, decompress};
    use crate::resolve::{Origin, resolve_compiled};

    fn table(files: &[(&str, &str)]) -> AssetTable {
        let records = files
            .iter()
            .map(|(p, c)| AssetRecord::new(*p, compress_bytes(c.as_bytes()).unwrap()));
        AssetTable::from_records(records, Fingerprint::random()).unwrap()
    }

    #[test]
    fn test_pack_load_preserves_table() {
        let original = table(&[("/index.html", "A"), ("/app.js", "B"), ("/img/x.png", "C")]);
        let bytes = render(&original, Some("embed")).unwrap();
        let packed = PackedAssets::from_bytes(&bytes).unwrap();

        assert_eq!(packed.table(), &original);
        assert_eq!(packed.tag(), Some("embed"));
    }

    #[test]
    fn test_pack_resolves_like_table() {
        let original = table(&[("/index.html", "A"), ("/app.js", "B")]);
        let packed = PackedAssets::from_bytes(&render(&original, None).unwrap()).unwrap();

        let asset = resolve_compiled(&packed, "/app.js");
        assert_eq!(asset.origin, Origin::Found);
        assert_eq!(decompress(&asset.data).unwrap(), b"B");
        assert_eq!(asset.content_type, "application/js");

        let asset = resolve_compiled(&packed, "/missing/route");
        assert_eq!(asset.origin, Origin::Fallback);
        assert_eq!(asset.fingerprint, original.fallback_token().to_hex());
    }

    #[test]
    fn test_pack_rejects_bad_header() {
        assert!(matches!(PackedAssets::from_bytes(b"AB"), Err(PackError::Truncated)));
        assert!(matches!(
            PackedAssets::from_bytes(b"ZZZZ\x01\0\0\0\0"),
            Err(PackError::BadMagic)
        ));
        assert!(matches!(
            PackedAssets::from_bytes(b"ABPK\x09\0\0\0\0"),
            Err(PackError::UnsupportedVersion(9))
        ));
        assert!(matches!(
            PackedAssets::from_bytes(b"ABPK\x01\xff\0\0\0{}"),
            Err(PackError::Truncated)
        ));
    }

    #[test]
    fn test_pack_detects_corrupt_payload() {
        let original = table(&[("/app.js", "B")]);
        let mut bytes = render(&original, None).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;

        assert!(matches!(
            PackedAssets::from_bytes(&bytes),
            Err(PackError::FingerprintMismatch(p)) if p == "/app.js"
        ));
    }

    #[test]
    fn test_pack_detects_truncated_payload() {
        let original = table(&[("/app.js", "B")]);
        let mut bytes = render(&original, None).unwrap();
        bytes.truncate(bytes.len() - 3);

        assert!(matches!(
            PackedAssets::from_bytes(&bytes),
            Err(PackError::OutOfBounds(_))
        ));
    }
}
