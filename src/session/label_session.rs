use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::labels::LabelCandidateSet;

/// Caller-owned state for stepping through images and labeling them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelSession {
    index: usize,
    image_count: usize,
    labels: BTreeMap<usize, String>,
}

impl LabelSession {
    pub fn new(image_count: usize) -> Self {
        Self {
            index: 0,
            image_count,
            labels: BTreeMap::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Move by `delta`, clamped to the first and last image
    pub fn move_by(&mut self, delta: isize) -> usize {
        if self.image_count == 0 {
            return self.index;
        }
        let last = self.image_count - 1;
        self.index = if delta < 0 {
            self.index.saturating_sub(delta.unsigned_abs())
        } else {
            self.index.saturating_add(delta as usize).min(last)
        };
        self.index
    }

    pub fn set_index(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.image_count {
            return Err(SessionError::IndexOutOfRange {
                index,
                count: self.image_count,
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.image_count
    }

    /// Label saved for the current image
    pub fn current_label(&self) -> Option<&str> {
        self.label_at(self.index)
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(|s| s.as_str())
    }

    pub fn save_label(&mut self, text: impl Into<String>) {
        self.labels.insert(self.index, text.into());
    }

    /// Mark the current image as deliberately unlabeled
    pub fn skip(&mut self) {
        self.save_label(String::new());
    }

    /// Save candidate `choice` as the current image's label
    pub fn select_candidate(
        &mut self,
        candidates: &LabelCandidateSet,
        choice: usize,
    ) -> Result<&str, SessionError> {
        let text = candidates
            .get(choice)
            .ok_or(SessionError::CandidateOutOfRange {
                index: choice,
                count: candidates.len(),
            })?
            .to_string();
        self.save_label(text);
        Ok(self.current_label().unwrap_or_default())
    }

    /// Number of images with a saved, non-empty label
    pub fn labeled_count(&self) -> usize {
        self.labels.values().filter(|label| !label.is_empty()).count()
    }

    /// `{"<index>": "<label>"}`, the payload the backend saves
    pub fn submission_json(&self) -> Result<String, SessionError> {
        let payload: BTreeMap<String, &str> = self
            .labels
            .iter()
            .map(|(index, label)| (index.to_string(), label.as_str()))
            .collect();
        Ok(serde_json::to_string(&payload)?)
    }
}
