pub mod digest;
pub mod id;
pub mod image_identity;
pub mod reference;
pub mod source;

pub use digest::{ContentDigest, Sha256Digest};
pub use image_identity::{IdentitySnapshot, ImageIdentity, PendingFingerprint, SnapshotDetail};
pub use reference::{ImageReference, ReferenceMetadata, SourceKind, UploadedFile};
pub use source::{ByteSource, FileSource, MemorySource};
