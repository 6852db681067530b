//! Runtime resolution: `path -> (payload, fingerprint, content type)`.
//!
//! Two modes share one contract. Resolution never fails; whether the path
//! was actually found is reported through [`Origin`].
//!
//! | Mode          | Source                            | Cost per call             |
//! |---------------|-----------------------------------|---------------------------|
//! | `Development` | files under a base directory      | read + gzip + digest      |
//! | `Compiled`    | a baked [`Catalog`] (static/pack) | lookup                    |

mod dev;
mod embedded;

pub use dev::DevAssets;
pub use embedded::{EmbeddedAsset, EmbeddedAssets};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::asset::mime::types;

/// Index document used for `/` and for single-page-app fallback.
pub const INDEX_PATH: &str = "/index.html";

/// How a resolved asset was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The requested path (or `/` → index document) exists.
    Found,
    /// The path is unknown; the index document was served instead.
    Fallback,
    /// Neither the path nor the index document exists.
    Missing,
}

/// A resolved asset. `data` is always gzip-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset<'a> {
    pub data: Cow<'a, [u8]>,
    pub fingerprint: Cow<'a, str>,
    pub content_type: &'static str,
    pub origin: Origin,
}

impl Asset<'_> {
    pub fn is_found(&self) -> bool {
        self.origin == Origin::Found
    }

    pub fn into_owned(self) -> Asset<'static> {
        Asset {
            data: Cow::Owned(self.data.into_owned()),
            fingerprint: Cow::Owned(self.fingerprint.into_owned()),
            content_type: self.content_type,
            origin: self.origin,
        }
    }
}

/// A baked, read-only path → asset lookup.
pub trait Catalog: Send + Sync {
    /// Exact lookup. Returned assets have [`Origin::Found`].
    fn get(&self, path: &str) -> Option<Asset<'_>>;

    /// Fingerprint reported for every default-case response.
    fn fallback_token(&self) -> Cow<'_, str>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn get(&self, path: &str) -> Option<Asset<'_>> {
        (**self).get(path)
    }

    fn fallback_token(&self) -> Cow<'_, str> {
        (**self).fallback_token()
    }
}

/// Resolve `path` against a baked catalog.
///
/// Unknown paths get the index document (single-page-app convention) or an
/// empty `text/html` body. Either way the fingerprint is the catalog's
/// fallback token, which never matches a cached content fingerprint.
pub fn resolve_compiled<'a, C: Catalog + ?Sized>(catalog: &'a C, path: &str) -> Asset<'a> {
    let lookup = if path == "/" { INDEX_PATH } else { path };
    if let Some(asset) = catalog.get(lookup) {
        return asset;
    }

    let fingerprint = catalog.fallback_token();
    match catalog.get(INDEX_PATH) {
        Some(index) => Asset {
            fingerprint,
            origin: Origin::Fallback,
            ..index
        },
        None => Asset {
            data: Cow::Borrowed(&[]),
            fingerprint,
            content_type: types::HTML,
            origin: Origin::Missing,
        },
    }
}

/// Resolver mode, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read and compress files from disk on every call.
    Development,
    /// Serve from a baked catalog.
    #[default]
    Compiled,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Compiled => f.write_str("compiled"),
        }
    }
}

/// The resolver handed to a serving collaborator.
pub enum Resolver {
    Development(DevAssets),
    Compiled(Arc<dyn Catalog>),
}

impl Resolver {
    pub fn development(base: impl Into<std::path::PathBuf>) -> Self {
        Self::Development(DevAssets::new(base))
    }

    pub fn compiled(catalog: impl Catalog + 'static) -> Self {
        Self::Compiled(Arc::new(catalog))
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Development(_) => Mode::Development,
            Self::Compiled(_) => Mode::Compiled,
        }
    }

    pub fn resolve(&self, path: &str) -> Asset<'_> {
        match self {
            Self::Development(dev) => dev.resolve(path),
            Self::Compiled(catalog) => resolve_compiled(catalog.as_ref(), path),
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development(dev) => f.debug_tuple("Development").field(dev).finish(),
            Self::Compiled(_) => f.write_str("Compiled"),
        }
    }
}
