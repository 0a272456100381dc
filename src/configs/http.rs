use serde::{Deserialize, Serialize};

use crate::common::HttpClient;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.lixstreamingcaio.com".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "HttpClient::default_user_agent")]
    pub user_agent: String,
    /// Per-request deadline. Unset leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub proxy: Option<HttpProxyConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: HttpClient::default_user_agent(),
            timeout_secs: None,
            proxy: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpProxyConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}
