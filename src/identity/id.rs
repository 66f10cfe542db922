use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// `.../draft/{digits}/image/...`
static DRAFT_IMAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/draft/(\d+)/image/").expect("valid draft pattern"));

/// Generate a session-scoped id: `img_{unix millis}_{9 hex chars}`
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().as_simple().to_string();
    format!("img_{}_{}", millis, &suffix[..9])
}

/// Recover `draft_{digits}_{filename}` from a draft image URL
pub fn draft_id_from_url(url: &str, filename: &str) -> Option<String> {
    DRAFT_IMAGE_PATTERN
        .captures(url)
        .map(|caps| format!("draft_{}_{}", &caps[1], filename))
}

/// Final path segment of a URL, ignoring query and fragment.
/// Empty when an absolute URL has no path.
pub fn filename_from_url(url: &str) -> String {
    let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
    let path = match without_suffix.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |start| &rest[start..]),
        None => without_suffix,
    };
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Pick an id by priority: explicit, metadata, draft URL, freshly generated
pub fn resolve_id(
    explicit: Option<&str>,
    metadata_id: Option<&str>,
    url: Option<&str>,
    filename: &str,
) -> String {
    if let Some(id) = explicit.filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    if let Some(id) = metadata_id.filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    if let Some(id) = url.and_then(|url| draft_id_from_url(url, filename)) {
        return id;
    }
    generate_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_generated_id(id: &str) -> bool {
        Regex::new(r"^img_\d+_[0-9a-f]{9}$").unwrap().is_match(id)
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = generate_id();
        let b = generate_id();
        assert!(is_generated_id(&a), "{}", a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(filename_from_url("/api/draft/42/image/photo.png"), "photo.png");
        assert_eq!(filename_from_url("https://cdn.example.com/a/b.jpg?size=2#x"), "b.jpg");
        assert_eq!(filename_from_url("/files/dir/"), "dir");
        assert_eq!(filename_from_url("photo.png"), "photo.png");
    }

    #[test]
    fn test_filename_ignores_host() {
        assert_eq!(filename_from_url("https://example.com"), "");
        assert_eq!(filename_from_url("https://example.com/"), "");
        assert_eq!(filename_from_url("https://example.com?q=photo.png"), "");
        assert_eq!(filename_from_url("https://example.com/photo.png"), "photo.png");
    }

    #[test]
    fn test_draft_pattern() {
        assert_eq!(
            draft_id_from_url("/api/draft/42/image/photo.png", "photo.png").as_deref(),
            Some("draft_42_photo.png")
        );
        assert_eq!(draft_id_from_url("/api/draft/abc/image/photo.png", "photo.png"), None);
        assert_eq!(draft_id_from_url("/files/photo.png", "photo.png"), None);
    }

    #[test]
    fn test_priority() {
        let url = Some("/api/draft/42/image/photo.png");
        assert_eq!(resolve_id(Some("given"), Some("meta"), url, "photo.png"), "given");
        assert_eq!(resolve_id(None, Some("meta"), url, "photo.png"), "meta");
        assert_eq!(resolve_id(None, None, url, "photo.png"), "draft_42_photo.png");
        assert!(is_generated_id(&resolve_id(None, None, Some("/files/photo.png"), "photo.png")));
        assert!(is_generated_id(&resolve_id(None, None, None, "photo.png")));
    }
}
