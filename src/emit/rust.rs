//! Rust module emitter.
//!
//! The artifact is a module file meant to be declared with `mod assets;`:
//!
//! ```text
//! // Code generated by assetbake. DO NOT EDIT.
//! #![cfg(feature = "embed")]              <- only with a tag
//! use assetbake::{...};
//! const INDEX_HTML: &[u8] = &[ 0x1f, 0x8b, ... ];
//! pub fn content_type(path: &str) -> &'static str
//! pub static ASSETS: EmbeddedAssets = EmbeddedAssets::new(&[...], "<token>");
//! pub fn asset(path: &str) -> Asset<'static>
//! ```

use std::fmt::{self, Write as _};
use std::io;

use super::ident;
use crate::asset::{AssetTable, BakeError};

/// Bytes per line in byte-array literals.
pub const BYTES_PER_LINE: usize = 12;

const PRELUDE: &str = "// Code generated by assetbake __ASSETBAKE_VERSION__. DO NOT EDIT.

__ASSETBAKE_CFG__#![allow(dead_code)]

use assetbake::{Asset, EmbeddedAsset, EmbeddedAssets};
";

const DISPATCH: &str = "
/// Content type of `path` (empty when unknown).
pub fn content_type(path: &str) -> &'static str {
    assetbake::content_type(path)
}

/// Fingerprint reported for unknown paths; regenerated on every bake.
pub const FALLBACK_TOKEN: &str = __ASSETBAKE_TOKEN__;

pub static ASSETS: EmbeddedAssets = EmbeddedAssets::new(
    &[
__ASSETBAKE_ENTRIES__    ],
    FALLBACK_TOKEN,
);

/// Gzip payload, fingerprint and content type for `path`.
///
/// Unknown paths resolve to `/index.html` when it exists.
pub fn asset(path: &str) -> Asset<'static> {
    ASSETS.resolve(path)
}
";

/// Header, optional feature gate and imports.
fn prelude(tag: Option<&str>) -> String {
    let cfg = tag
        .map(|tag| format!("#![cfg(feature = {tag:?})]\n"))
        .unwrap_or_default();
    PRELUDE
        .replace("__ASSETBAKE_VERSION__", env!("CARGO_PKG_VERSION"))
        .replace("__ASSETBAKE_CFG__", &cfg)
}

/// Content-type re-export, sorted dispatch table and `asset()`.
fn dispatch(token: &str, entries: &str) -> String {
    DISPATCH
        .replace("__ASSETBAKE_TOKEN__", &format!("{token:?}"))
        .replace("__ASSETBAKE_ENTRIES__", entries)
}

/// Formats bytes as a Rust byte-array body, `BYTES_PER_LINE` per line.
pub struct ByteLiteralWriter<W> {
    out: W,
    count: usize,
}

impl<W: fmt::Write> ByteLiteralWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    /// Terminate the last line and return the sink.
    pub fn finish(mut self) -> Result<W, fmt::Error> {
        self.out.write_char('\n')?;
        Ok(self.out)
    }

    fn push(&mut self, byte: u8) -> fmt::Result {
        if self.count % BYTES_PER_LINE == 0 {
            self.out.write_str("\n    ")?;
        } else {
            self.out.write_char(' ')?;
        }
        write!(self.out, "0x{byte:02x},")?;
        self.count += 1;
        Ok(())
    }
}

impl<W: fmt::Write> io::Write for ByteLiteralWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.push(byte).map_err(io::Error::other)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Render `table` as a Rust module.
pub fn render(table: &AssetTable, tag: Option<&str>) -> Result<String, BakeError> {
    let named = ident::assign(table);
    let mut out = prelude(tag);

    for (record, name) in &named {
        out.push_str(&format!("\n// {:?}\nconst {name}: &[u8] = &[", record.path));
        let mut bytes = ByteLiteralWriter::new(out);
        io::Write::write_all(&mut bytes, &record.payload).map_err(fmt_failure)?;
        out = bytes
            .finish()
            .map_err(|e| fmt_failure(io::Error::other(e)))?;
        out.push_str("];\n");
    }

    let mut entries = String::new();
    for (record, name) in &named {
        // writing into a String cannot fail
        let _ = writeln!(
            entries,
            "        EmbeddedAsset::new({:?}, {name}, {:?}, {:?}),",
            record.path,
            record.fingerprint.to_hex(),
            record.content_type,
        );
    }

    out.push_str(&dispatch(&table.fallback_token().to_hex(), &entries));
    Ok(out)
}

fn fmt_failure(err: io::Error) -> BakeError {
    BakeError::Write("<rust module>".into(), err)
}

/// A generated module checked in as source and compiled with the tests.
#[cfg(test)]
#[rustfmt::skip]
#[path = "fixtures/assets.rs"]
mod fixture;
