//! Streaming gzip compression with an inline fingerprint.
//!
//! The compressor writes into a [`FingerprintWriter`], so the digest is
//! computed over exactly the bytes that end up in the payload.

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use std::io::{self, Read, Write};

use super::Fingerprint;

/// Tee sink: forwards every byte to `inner` and into a running blake3 digest.
pub struct FingerprintWriter<W> {
    inner: W,
    hasher: blake3::Hasher,
}

impl<W: Write> FingerprintWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: blake3::Hasher::new(),
        }
    }

    /// Finalize the digest and hand back the inner writer.
    pub fn finish(self) -> (W, Fingerprint) {
        let fingerprint = Fingerprint::from_digest(&self.hasher.finalize());
        (self.inner, fingerprint)
    }
}

impl<W: Write> Write for FingerprintWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A compressed payload and the fingerprint of those compressed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub payload: Vec<u8>,
    pub fingerprint: Fingerprint,
}

/// Compress a byte stream at maximum ratio.
///
/// The gzip header carries no mtime and no file name, so identical input
/// always yields identical payloads (and fingerprints).
pub fn compress_reader(mut reader: impl Read) -> io::Result<Compressed> {
    let sink = FingerprintWriter::new(Vec::new());
    let mut encoder = GzBuilder::new().mtime(0).write(sink, Compression::best());
    io::copy(&mut reader, &mut encoder)?;
    let (payload, fingerprint) = encoder.finish()?.finish();
    Ok(Compressed {
        payload,
        fingerprint,
    })
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> io::Result<Compressed> {
    compress_reader(data)
}

/// Inflate a gzip payload back to the original bytes.
pub fn decompress(payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(payload).read_to_end(&mut out)?;
    Ok(out)
}
