//! Asset records and the immutable path → record table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{BakeError, Compressed, Fingerprint, content_type};
use crate::resolve::{Asset, Catalog, Origin};

/// One baked file: compressed payload, fingerprint and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Root-relative path, always starting with `/`.
    pub path: String,
    /// Gzip payload.
    pub payload: Arc<[u8]>,
    /// Fingerprint of `payload`.
    pub fingerprint: Fingerprint,
    pub content_type: &'static str,
}

impl AssetRecord {
    pub fn new(path: impl Into<String>, compressed: Compressed) -> Self {
        let path = path.into();
        Self {
            content_type: content_type(&path),
            payload: compressed.payload.into(),
            fingerprint: compressed.fingerprint,
            path,
        }
    }

    /// Borrow this record as a resolved asset.
    pub fn as_asset(&self) -> Asset<'_> {
        Asset {
            data: Cow::Borrowed(&self.payload),
            fingerprint: Cow::Owned(self.fingerprint.to_hex()),
            content_type: self.content_type,
            origin: Origin::Found,
        }
    }
}

/// Path → record mapping, ordered by path.
///
/// Built once by [`crate::bake`] or loaded from a pack; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTable {
    records: BTreeMap<String, AssetRecord>,
    fallback_token: Fingerprint,
}

impl AssetTable {
    /// Build a table from records, rejecting duplicate paths.
    pub fn from_records(
        records: impl IntoIterator<Item = AssetRecord>,
        fallback_token: Fingerprint,
    ) -> Result<Self, BakeError> {
        let mut map = BTreeMap::new();
        for record in records {
            if map.contains_key(&record.path) {
                return Err(BakeError::DuplicatePath(record.path));
            }
            map.insert(record.path.clone(), record);
        }
        Ok(Self {
            records: map,
            fallback_token,
        })
    }

    pub fn get(&self, path: &str) -> Option<&AssetRecord> {
        self.records.get(path)
    }

    /// Records in path order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord> {
        self.records.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Token served as the fingerprint of every default-case response.
    pub fn fallback_token(&self) -> Fingerprint {
        self.fallback_token
    }

    /// Sum of all payload sizes.
    pub fn payload_bytes(&self) -> usize {
        self.records.values().map(|r| r.payload.len()).sum()
    }
}

impl Catalog for AssetTable {
    fn get(&self, path: &str) -> Option<Asset<'_>> {
        self.records.get(path).map(AssetRecord::as_asset)
    }

    fn fallback_token(&self) -> Cow<'_, str> {
        Cow::Owned(self.fallback_token.to_hex())
    }
}
