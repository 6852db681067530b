//! Static asset tables compiled into a binary.
//!
//! Generated modules declare one `EmbeddedAssets` whose entries are sorted
//! by path, so lookups are a binary search over a `'static` slice.

use std::borrow::Cow;

use super::{Asset, Catalog, Origin, resolve_compiled};

/// One compiled-in asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedAsset {
    pub path: &'static str,
    pub data: &'static [u8],
    pub fingerprint: &'static str,
    pub content_type: &'static str,
}

impl EmbeddedAsset {
    pub const fn new(
        path: &'static str,
        data: &'static [u8],
        fingerprint: &'static str,
        content_type: &'static str,
    ) -> Self {
        Self {
            path,
            data,
            fingerprint,
            content_type,
        }
    }

    pub fn as_asset(&self) -> Asset<'static> {
        Asset {
            data: Cow::Borrowed(self.data),
            fingerprint: Cow::Borrowed(self.fingerprint),
            content_type: self.content_type,
            origin: Origin::Found,
        }
    }
}

/// A sorted, compiled-in asset table.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    entries: &'static [EmbeddedAsset],
    fallback_token: &'static str,
}

impl EmbeddedAssets {
    /// `entries` must be sorted by path; generated modules always are.
    pub const fn new(entries: &'static [EmbeddedAsset], fallback_token: &'static str) -> Self {
        Self {
            entries,
            fallback_token,
        }
    }

    pub fn entry(&self, path: &str) -> Option<&'static EmbeddedAsset> {
        let entries = self.entries;
        entries
            .binary_search_by(|e| e.path.cmp(path))
            .ok()
            .map(|i| &entries[i])
    }

    /// Resolve with single-page-app fallback.
    pub fn resolve(&'static self, path: &str) -> Asset<'static> {
        resolve_compiled(self, path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static EmbeddedAsset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Asset<'_>> {
        self.entry(path).map(EmbeddedAsset::as_asset)
    }

    fn fallback_token(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.fallback_token)
    }
}
