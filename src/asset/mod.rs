//! Build-time asset pipeline: walk → compress → fingerprint → table.

mod build;
mod compress;
mod error;
mod fingerprint;
pub mod mime;
mod table;
mod walk;

pub use build::{BakeOptions, bake};
pub use compress::{Compressed, FingerprintWriter, compress_bytes, compress_reader, decompress};
pub use error::BakeError;
pub use fingerprint::Fingerprint;
pub use mime::content_type;
pub use table::{AssetRecord, AssetTable};
pub use walk::{WalkEntry, walk};
