use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::IdentityError;
use crate::identity::source::{ByteSource, FileSource, MemorySource};

/// Where an identity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Upload,
    Existing,
}

/// Metadata the backend keeps for an image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMetadata {
    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide: Option<String>,
}

/// A newly added local file
#[derive(Clone)]
pub struct UploadedFile {
    pub source: Arc<dyn ByteSource>,
    pub filename: String,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// An image handed to the identity factory
#[derive(Debug, Clone)]
pub enum ImageReference {
    Upload(UploadedFile),
    Existing {
        url: String,
        metadata: Option<ReferenceMetadata>,
    },
}

impl ImageReference {
    /// Upload from bytes already in memory
    pub fn upload(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self::upload_from(Arc::new(MemorySource::new(bytes)), filename)
    }

    /// Upload backed by any byte source
    pub fn upload_from(source: Arc<dyn ByteSource>, filename: impl Into<String>) -> Self {
        Self::Upload(UploadedFile {
            source,
            filename: filename.into(),
        })
    }

    /// Upload backed by a local file, named after its final path component
    pub fn upload_file(path: impl Into<std::path::PathBuf>) -> Self {
        let source = FileSource::new(path);
        let filename = source.file_name();
        Self::upload_from(Arc::new(source), filename)
    }

    pub fn existing(url: impl Into<String>, metadata: Option<ReferenceMetadata>) -> Self {
        Self::Existing {
            url: url.into(),
            metadata,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Upload(_) => SourceKind::Upload,
            Self::Existing { .. } => SourceKind::Existing,
        }
    }
}

impl TryFrom<&Value> for ImageReference {
    type Error = IdentityError;

    /// Classify a raw JSON reference.
    ///
    /// A string is an existing URL. An object with a string `url` is an
    /// existing reference (its `metadata` is optional). An object with a
    /// string `path` is a file-backed upload, named by `filename` when given.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(url) => Ok(Self::existing(url.clone(), None)),
            Value::Object(map) => {
                if let Some(url) = map.get("url").and_then(|v| v.as_str()) {
                    let metadata = match map.get("metadata") {
                        None | Some(Value::Null) => None,
                        Some(raw) => Some(
                            serde_json::from_value::<ReferenceMetadata>(raw.clone()).map_err(
                                |e| IdentityError::InvalidReferenceType(format!("bad metadata: {}", e)),
                            )?,
                        ),
                    };
                    return Ok(Self::existing(url, metadata));
                }

                if let Some(path) = map.get("path").and_then(|v| v.as_str()) {
                    let source = FileSource::new(path);
                    let filename = map
                        .get("filename")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| source.file_name());
                    return Ok(Self::upload_from(Arc::new(source), filename));
                }

                Err(IdentityError::InvalidReferenceType(
                    "object has neither `url` nor `path`".to_string(),
                ))
            }
            other => Err(IdentityError::InvalidReferenceType(format!(
                "expected a URL string or a reference object, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accept ids and slides the backend emits as either strings or integers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            json_type_name(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_is_existing_url() {
        let reference = ImageReference::try_from(&json!("/api/draft/42/image/photo.png")).unwrap();
        assert_eq!(reference.kind(), SourceKind::Existing);
    }

    #[test]
    fn test_object_with_metadata() {
        let raw = json!({"url": "/files/a.png", "metadata": {"id": 7, "label": "Cat", "slide": "x1"}});
        match ImageReference::try_from(&raw).unwrap() {
            ImageReference::Existing { url, metadata } => {
                assert_eq!(url, "/files/a.png");
                let metadata = metadata.unwrap();
                assert_eq!(metadata.id.as_deref(), Some("7"));
                assert_eq!(metadata.label.as_deref(), Some("Cat"));
                assert_eq!(metadata.slide.as_deref(), Some("x1"));
            }
            other => panic!("unexpected reference: {:?}", other),
        }
    }

    #[test]
    fn test_path_object_is_upload() {
        let raw = json!({"path": "/tmp/uploads/img_000003.jpg"});
        match ImageReference::try_from(&raw).unwrap() {
            ImageReference::Upload(file) => assert_eq!(file.filename, "img_000003.jpg"),
            other => panic!("unexpected reference: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_reference_types() {
        for raw in [json!(42), json!(null), json!([1, 2]), json!({"name": "a.png"})] {
            let err = ImageReference::try_from(&raw).unwrap_err();
            assert!(matches!(err, IdentityError::InvalidReferenceType(_)), "{:?}", raw);
        }
    }
}
