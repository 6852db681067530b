//! Fixed-length content fingerprints used as ETag values.

use rand::RngCore;
use std::fmt;

/// Number of digest bytes kept in a fingerprint.
const FINGERPRINT_BYTES: usize = 16;

/// A 128-bit fingerprint, rendered as 32 lowercase hex chars.
///
/// Content fingerprints are the leading bytes of the blake3 digest of a
/// record's compressed payload. Fallback tokens are random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = FINGERPRINT_BYTES * 2;

    #[inline]
    pub const fn new(bytes: [u8; FINGERPRINT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Fingerprint of a finalized blake3 digest.
    pub fn from_digest(hash: &blake3::Hash) -> Self {
        let mut bytes = [0u8; FINGERPRINT_BYTES];
        bytes.copy_from_slice(&hash.as_bytes()[..FINGERPRINT_BYTES]);
        Self(bytes)
    }

    /// Fingerprint of an in-memory byte slice.
    pub fn of(data: &[u8]) -> Self {
        Self::from_digest(&blake3::hash(data))
    }

    /// A random token that matches no content fingerprint.
    pub fn random() -> Self {
        let mut bytes = [0u8; FINGERPRINT_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.0
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let bytes: [u8; FINGERPRINT_BYTES] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
