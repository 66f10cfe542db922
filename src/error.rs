//! Error types for image identity and label sessions

use thiserror::Error;

/// Errors raised while identifying images
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Byte content of an uploaded file could not be read
    #[error("Unreadable source '{filename}': {reason}")]
    UnreadableSource { filename: String, reason: String },

    /// The content digest could not be computed
    #[error("Digest unavailable: {0}")]
    DigestUnavailable(String),

    /// A raw reference is neither a file-like record nor a URL
    #[error("Invalid reference type: {0}")]
    InvalidReferenceType(String),

    /// Identities were compared before their fingerprints resolved
    #[error("Fingerprint for image '{0}' has not resolved yet")]
    FingerprintPending(String),
}

/// Errors raised by a label session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Index {index} is out of range for {count} images")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Candidate {index} is out of range for {count} candidates")]
    CandidateOutOfRange { index: usize, count: usize },

    #[error("Failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),
}
