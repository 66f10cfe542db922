use futures::future::join_all;
use tracing::{info, warn};

use crate::identity::{IdentitySnapshot, ImageIdentity, ImageReference, PendingFingerprint, ReferenceMetadata, SnapshotDetail};

/// Result of adding an image to a working set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added { id: String },
    /// Same fingerprint as an image already in the set; not inserted
    Duplicate { id: String, existing_id: String },
    /// Different image whose id is already taken; not inserted
    IdConflict { id: String },
}

/// Images currently being assembled, deduplicated by fingerprint. Ids are unique.
#[derive(Debug, Default)]
pub struct WorkingSet {
    entries: Vec<ImageIdentity>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the fingerprint, then insert unless an equal one or the same id exists
    pub async fn add(&mut self, identity: ImageIdentity, pending: &PendingFingerprint) -> AddOutcome {
        let fingerprint = pending.resolve().await;

        if let Some(existing) = self
            .entries
            .iter()
            .find(|entry| entry.fingerprint() == Some(fingerprint.as_str()))
        {
            info!(id = %identity.id(), existing_id = %existing.id(), "Skipping duplicate image");
            return AddOutcome::Duplicate {
                id: identity.id().to_string(),
                existing_id: existing.id().to_string(),
            };
        }

        let id = identity.id().to_string();
        if let Some(existing) = self.get(&id) {
            warn!(id = %id, filename = %identity.filename(), existing_filename = %existing.filename(), "Image id already in use");
            return AddOutcome::IdConflict { id };
        }

        info!(id = %id, filename = %identity.filename(), "Added image to working set");
        self.entries.push(identity);
        AddOutcome::Added { id }
    }

    /// Add a batch in order, resolving all fingerprints together first
    pub async fn add_all(&mut self, items: Vec<(ImageIdentity, PendingFingerprint)>) -> Vec<AddOutcome> {
        join_all(items.iter().map(|(_, pending)| pending.resolve())).await;

        let mut outcomes = Vec::with_capacity(items.len());
        for (identity, pending) in items {
            outcomes.push(self.add(identity, &pending).await);
        }
        outcomes
    }

    /// Identify a reference and add it
    pub async fn add_reference(
        &mut self,
        reference: ImageReference,
        id: Option<&str>,
        metadata: Option<ReferenceMetadata>,
    ) -> AddOutcome {
        let (identity, pending) = ImageIdentity::create(reference, id, metadata);
        self.add(identity, &pending).await
    }

    pub fn remove(&mut self, id: &str) -> Option<ImageIdentity> {
        let position = self.entries.iter().position(|entry| entry.id() == id)?;
        info!(id = %id, "Removed image from working set");
        Some(self.entries.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&ImageIdentity> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageIdentity> {
        self.entries.iter()
    }

    pub fn snapshots(&self, detail: SnapshotDetail) -> Vec<IdentitySnapshot> {
        self.entries.iter().map(|entry| entry.snapshot(detail)).collect()
    }
}
