//! Content digests and fingerprint formats
//!
//! Three fingerprint shapes exist and never overlap:
//! - genuine content hashes: 64 lowercase hex characters
//! - existing references: `existing_{filename}`
//! - fallbacks after a failed read or digest: `fallback_{filename}_{len}`

use sha2::{Digest, Sha256};

use crate::error::IdentityError;

pub const EXISTING_PREFIX: &str = "existing_";
pub const FALLBACK_PREFIX: &str = "fallback_";

/// Digest primitive used to fingerprint uploaded bytes
pub trait ContentDigest: Send + Sync {
    /// Lowercase hex digest of `bytes`
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, IdentityError>;
}

/// SHA-256 content digest
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl ContentDigest for Sha256Digest {
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, IdentityError> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Fingerprint of an image the backend already has
pub fn existing_fingerprint(filename: &str) -> String {
    format!("{}{}", EXISTING_PREFIX, filename)
}

/// Fingerprint used when an upload could not be hashed
pub fn fallback_fingerprint(filename: &str, len: Option<u64>) -> String {
    match len {
        Some(len) => format!("{}{}_{}", FALLBACK_PREFIX, filename, len),
        None => format!("{}{}_unknown", FALLBACK_PREFIX, filename),
    }
}

/// Whether `fingerprint` came from hashing content
pub fn is_content_hash(fingerprint: &str) -> bool {
    fingerprint.len() == 64
        && fingerprint
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
