use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::StreamApi;
use super::models::{AssetResponse, ResourceResponse, VideoMetadata};
use crate::common::{HttpClient, LixError, LixResult, VideoId};
use crate::configs::Config;

const RESOURCES_PATH: &str = "/v2/s/home/resources";
const ASSETS_PATH: &str = "/v2/s/assets/f";

/// HTTP client for the Lixstream public API.
#[derive(Clone)]
pub struct LixClient {
    client: reqwest::Client,
    base_url: String,
}

impl LixClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &Config) -> LixResult<Self> {
        let client = HttpClient::new(&config.http)?;
        Ok(Self::new(client, config.api.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn metadata_url(&self, video_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            RESOURCES_PATH,
            urlencoding::encode(video_id)
        )
    }

    fn asset_url(&self, file_id: &str, suid: &str) -> String {
        format!(
            "{}{}?id={}&uid={}",
            self.base_url,
            ASSETS_PATH,
            urlencoding::encode(file_id),
            urlencoding::encode(suid)
        )
    }

    /// Checks the status and decodes the JSON body, logging any failure.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Result<Response>,
        what: &str,
    ) -> LixResult<T> {
        let result = match response.and_then(Response::error_for_status) {
            Ok(resp) => resp.json::<T>().await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            warn!("Lixstream: failed to get {}: {}", what, e);
            LixError::Transport(e)
        })
    }
}

#[async_trait]
impl StreamApi for LixClient {
    async fn fetch_metadata(&self, video_id: &VideoId) -> LixResult<VideoMetadata> {
        let url = self.metadata_url(video_id);
        debug!("Lixstream: POST {}", url);

        let response = self.client.post(&url).send().await;
        let body: ResourceResponse = Self::read_json(response, "video metadata").await?;

        body.into_metadata().map_err(|reason| {
            warn!("Lixstream: no metadata for {}: {}", video_id, reason);
            LixError::not_found(reason)
        })
    }

    async fn fetch_asset_url(&self, metadata: &VideoMetadata) -> LixResult<String> {
        let file = match metadata.primary_file() {
            Some(file) if !file.id.is_empty() && !metadata.suid.is_empty() => file,
            _ => {
                warn!("Lixstream: metadata lacks a file id or session id, skipping asset lookup");
                return Err(LixError::not_found("metadata carried no file or session id"));
            }
        };

        let url = self.asset_url(&file.id, &metadata.suid);
        debug!("Lixstream: GET {}", url);

        let response = self.client.get(&url).send().await;
        let body: AssetResponse = Self::read_json(response, "asset url").await?;

        body.url.filter(|u| !u.is_empty()).ok_or_else(|| {
            warn!("Lixstream: asset response for file {} had no url", file.id);
            LixError::not_found("asset response carried no url")
        })
    }
}
