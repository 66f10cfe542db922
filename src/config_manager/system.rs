use serde::{Deserialize, Serialize};

/// System configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(rename = "conf_version")]
    #[serde(default = "default_conf_version")]
    pub conf_version: String,

    /// Route prefix of the backend's draft image endpoint
    #[serde(rename = "image_route_prefix")]
    #[serde(default = "default_image_route_prefix")]
    pub image_route_prefix: String,
}

fn default_conf_version() -> String {
    "v1.0.0".to_string()
}

fn default_image_route_prefix() -> String {
    "/api/draft".to_string()
}

impl SystemConfig {
    /// URL of a draft image as served by the backend
    pub fn draft_image_url(&self, draft_id: u64, filename: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.image_route_prefix.trim_end_matches('/'),
            draft_id,
            filename
        )
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            conf_version: default_conf_version(),
            image_route_prefix: default_image_route_prefix(),
        }
    }
}
