pub mod client;
pub mod crypt;
pub mod identifier;
pub mod models;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{LixError, LixResult, VideoId};

pub use client::LixClient;
pub use crypt::decrypt_url;
pub use identifier::extract_video_id;
pub use models::{DecryptedAsset, VideoFile, VideoMetadata};

/// The two remote lookups a resolve run needs.
///
/// [`LixClient`] talks to the real service; tests swap in stubs.
#[async_trait]
pub trait StreamApi: Send + Sync {
    /// Resolves an identifier into its session and file list.
    async fn fetch_metadata(&self, video_id: &VideoId) -> LixResult<VideoMetadata>;

    /// Requests the still-encrypted asset URL for the primary file.
    async fn fetch_asset_url(&self, metadata: &VideoMetadata) -> LixResult<String>;

    /// Locates the asset and decrypts its URL.
    async fn fetch_asset(&self, metadata: &VideoMetadata) -> LixResult<DecryptedAsset> {
        let encrypted = self.fetch_asset_url(metadata).await?;
        let embed_url = decrypt_url(&encrypted)?;
        Ok(DecryptedAsset { embed_url })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedVideo {
    pub video_id: VideoId,
    pub metadata: VideoMetadata,
    pub asset: DecryptedAsset,
}

impl ResolvedVideo {
    pub fn primary_file(&self) -> Option<&VideoFile> {
        self.metadata.primary_file()
    }
}

/// Runs extract, metadata, locate and decrypt in order, stopping at the
/// first failure.
pub async fn resolve<A>(api: &A, input: &str) -> LixResult<ResolvedVideo>
where
    A: StreamApi + ?Sized,
{
    let video_id =
        extract_video_id(input).ok_or_else(|| LixError::InvalidInput(input.to_string()))?;
    debug!("Lixstream: resolving video {}", video_id);

    let metadata = api.fetch_metadata(&video_id).await?;
    let asset = api.fetch_asset(&metadata).await?;

    info!(
        "Lixstream: resolved {} ({} file(s))",
        video_id,
        metadata.files.len()
    );

    Ok(ResolvedVideo {
        video_id,
        metadata,
        asset,
    })
}
