//! Draft gallery records as returned by the backend

use serde::{Deserialize, Serialize};

use crate::config_manager::system::SystemConfig;
use crate::identity::reference::{string_or_number, ImageReference, ReferenceMetadata};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub filename: String,

    #[serde(default)]
    pub label: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<String>,

    /// Explicit image URL; built from the draft route when absent
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Text found on a slide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryLabel {
    pub text: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<u64>,

    #[serde(default)]
    pub images: Vec<GalleryImage>,

    #[serde(default)]
    pub labels: Vec<GalleryLabel>,
}

impl Gallery {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Existing references for every image, in manifest order
    pub fn references(&self, system_config: &SystemConfig) -> Vec<ImageReference> {
        self.images
            .iter()
            .map(|image| {
                let url = match (&image.url, self.draft_id) {
                    (Some(url), _) => url.clone(),
                    (None, Some(draft_id)) => system_config.draft_image_url(draft_id, &image.filename),
                    (None, None) => image.filename.clone(),
                };
                let metadata = ReferenceMetadata {
                    id: image.id.clone(),
                    label: Some(image.label.clone()),
                    slide: image.slide.clone(),
                };
                ImageReference::existing(url, Some(metadata))
            })
            .collect()
    }

    /// Raw label texts recorded for one slide
    pub fn options_for_slide(&self, slide: &str) -> Vec<String> {
        self.labels
            .iter()
            .filter(|label| label.slide.as_deref() == Some(slide))
            .map(|label| label.text.clone())
            .collect()
    }
}
