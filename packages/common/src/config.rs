use serde::Deserialize;

/// Connection settings for the award-program API.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiAppConfig {
    /// Base URL of the REST API. Default: "http://localhost:8080/api".
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Default: 30.
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size used by list views. Default: 10.
    #[serde(default = "default_api_per_page")]
    pub per_page: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".into()
}
fn default_api_timeout_secs() -> u64 {
    30
}
fn default_api_per_page() -> u64 {
    10
}

impl Default for ApiAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout_secs(),
            per_page: default_api_per_page(),
        }
    }
}
