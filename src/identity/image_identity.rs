use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::IdentityError;
use crate::identity::digest::{existing_fingerprint, fallback_fingerprint, ContentDigest, Sha256Digest};
use crate::identity::id::{filename_from_url, resolve_id};
use crate::identity::reference::{ImageReference, ReferenceMetadata, SourceKind};
use crate::identity::source::ByteSource;

/// How much of an identity a snapshot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotDetail {
    IdOnly,
    #[default]
    Full,
}

/// Caller-facing projection of an identity. Never carries image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<String>,
}

/// Stable identity of one image in a working set.
///
/// Everything except the fingerprint is known at construction. The
/// fingerprint is set once by the [`PendingFingerprint`] returned next to
/// the identity and never changes afterwards.
#[derive(Debug, Clone)]
pub struct ImageIdentity {
    id: String,
    source_kind: SourceKind,
    filename: String,
    label: String,
    slide: String,
    fingerprint: Arc<OnceCell<String>>,
}

impl ImageIdentity {
    /// Build an identity and the handle that resolves its fingerprint.
    ///
    /// `metadata` takes precedence over metadata embedded in an existing
    /// reference.
    pub fn create(
        reference: ImageReference,
        id: Option<&str>,
        metadata: Option<ReferenceMetadata>,
    ) -> (Self, PendingFingerprint) {
        Self::create_with_digest(reference, id, metadata, Arc::new(Sha256Digest))
    }

    pub fn create_with_digest(
        reference: ImageReference,
        id: Option<&str>,
        metadata: Option<ReferenceMetadata>,
        digest: Arc<dyn ContentDigest>,
    ) -> (Self, PendingFingerprint) {
        let source_kind = reference.kind();

        let (filename, url, metadata, pending) = match reference {
            ImageReference::Upload(file) => {
                let pending = PendingFingerprint::for_upload(file.source, file.filename.clone(), digest);
                (file.filename, None, metadata, pending)
            }
            ImageReference::Existing { url, metadata: embedded } => {
                let filename = filename_from_url(&url);
                let pending = PendingFingerprint::resolved(existing_fingerprint(&filename));
                (filename, Some(url), metadata.or(embedded), pending)
            }
        };

        let metadata = metadata.unwrap_or_default();
        let id = resolve_id(id, metadata.id.as_deref(), url.as_deref(), &filename);
        debug!(id = %id, filename = %filename, kind = ?source_kind, "Created image identity");

        let identity = Self {
            id,
            source_kind,
            filename,
            label: metadata.label.unwrap_or_default(),
            slide: metadata.slide.unwrap_or_default(),
            fingerprint: pending.value.clone(),
        };

        (identity, pending)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn slide(&self) -> &str {
        &self.slide
    }

    /// Resolved fingerprint, or `None` while it is still pending
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.get().map(|s| s.as_str())
    }

    /// Whether both identities refer to the same image.
    ///
    /// Both fingerprints must have resolved.
    pub fn same_image(&self, other: &ImageIdentity) -> Result<bool, IdentityError> {
        let mine = self
            .fingerprint()
            .ok_or_else(|| IdentityError::FingerprintPending(self.id.clone()))?;
        let theirs = other
            .fingerprint()
            .ok_or_else(|| IdentityError::FingerprintPending(other.id.clone()))?;
        Ok(mine == theirs)
    }

    pub fn snapshot(&self, detail: SnapshotDetail) -> IdentitySnapshot {
        match detail {
            SnapshotDetail::IdOnly => IdentitySnapshot {
                id: self.id.clone(),
                filename: None,
                label: None,
                slide: None,
            },
            SnapshotDetail::Full => IdentitySnapshot {
                id: self.id.clone(),
                filename: Some(self.filename.clone()),
                label: Some(self.label.clone()),
                slide: Some(self.slide.clone()),
            },
        }
    }
}

/// Handle that resolves an identity's fingerprint.
///
/// Resolution happens on the first `resolve().await`; later calls return the
/// stored value. A resolution dropped midway can be retried.
#[derive(Clone)]
pub struct PendingFingerprint {
    value: Arc<OnceCell<String>>,
    job: Arc<FingerprintJob>,
}

struct FingerprintJob {
    filename: String,
    source: Mutex<Option<Arc<dyn ByteSource>>>,
    digest: Arc<dyn ContentDigest>,
}

impl PendingFingerprint {
    fn for_upload(source: Arc<dyn ByteSource>, filename: String, digest: Arc<dyn ContentDigest>) -> Self {
        Self {
            value: Arc::new(OnceCell::new()),
            job: Arc::new(FingerprintJob {
                filename,
                source: Mutex::new(Some(source)),
                digest,
            }),
        }
    }

    fn resolved(fingerprint: String) -> Self {
        Self {
            value: Arc::new(OnceCell::new_with(Some(fingerprint))),
            job: Arc::new(FingerprintJob {
                filename: String::new(),
                source: Mutex::new(None),
                digest: Arc::new(Sha256Digest),
            }),
        }
    }

    /// Wait for the fingerprint. Failures resolve to a fallback value.
    pub async fn resolve(&self) -> String {
        let value = self.value.get_or_init(|| self.job.run()).await.clone();
        self.job.release();
        value
    }

    pub fn is_ready(&self) -> bool {
        self.value.initialized()
    }

    /// Resolved value without waiting
    pub fn get(&self) -> Option<&str> {
        self.value.get().map(|s| s.as_str())
    }
}

impl fmt::Debug for PendingFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFingerprint")
            .field("value", &self.value.get())
            .finish_non_exhaustive()
    }
}

impl FingerprintJob {
    async fn run(&self) -> String {
        let source = self.source.lock().ok().and_then(|guard| guard.clone());
        let Some(source) = source else {
            warn!(filename = %self.filename, "Byte source already released, using fallback fingerprint");
            return fallback_fingerprint(&self.filename, None);
        };

        match self.hash(source.as_ref()).await {
            Ok(hex) => {
                debug!(filename = %self.filename, "Calculated content hash");
                hex
            }
            Err(e) => {
                warn!(filename = %self.filename, error = %e, "Hash generation failed, using fallback fingerprint");
                fallback_fingerprint(&self.filename, source.declared_len().await)
            }
        }
    }

    async fn hash(&self, source: &dyn ByteSource) -> Result<String, IdentityError> {
        let bytes = source.read_all().await?;
        self.digest.digest_hex(&bytes)
    }

    /// Drop the byte source once the fingerprint is stored
    fn release(&self) {
        if let Ok(mut guard) = self.source.lock() {
            guard.take();
        }
    }
}
