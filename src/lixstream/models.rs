use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One deliverable media variant of a video.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoFile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Size in bytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    /// Duration in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub update_time: Option<String>,
    #[serde(default)]
    pub collage_screenshots: Option<Vec<String>>,
}

impl VideoFile {
    /// Duration as `MM:SS`; minutes are not wrapped into hours.
    pub fn formatted_duration(&self) -> String {
        format!("{:02}:{:02}", self.duration / 60, self.duration % 60)
    }
}

/// Resolved session state for one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub suid: String,
    pub files: Vec<VideoFile>,
    pub ip_country: Option<String>,
    pub player_theme: Option<String>,
    pub slink: Option<String>,
    pub sid: Option<String>,
}

impl VideoMetadata {
    /// The file that gets displayed and located.
    pub fn primary_file(&self) -> Option<&VideoFile> {
        self.files.first()
    }
}

/// Plaintext asset URL recovered from the obfuscated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptedAsset {
    pub embed_url: String,
}

/// Raw body of `POST /v2/s/home/resources/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceResponse {
    #[serde(default)]
    pub suid: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<VideoFile>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ip_country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub player_theme: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub slink: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sid: Option<String>,
}

impl ResourceResponse {
    /// Maps the raw body onto [`VideoMetadata`].
    ///
    /// Returns `Err` with the reason when the body lacks a session id, has
    /// no files, or has a file without an id.
    pub fn into_metadata(self) -> Result<VideoMetadata, &'static str> {
        let suid = self
            .suid
            .filter(|s| !s.is_empty())
            .ok_or("response carried no session id")?;

        let files = self
            .files
            .filter(|f| !f.is_empty())
            .ok_or("response carried no files")?;

        if files.iter().any(|f| f.id.is_empty()) {
            return Err("response carried a file without an id");
        }

        Ok(VideoMetadata {
            suid,
            files,
            ip_country: self.ip_country,
            player_theme: self.player_theme,
            slink: self.slink,
            sid: self.sid,
        })
    }
}

/// Raw body of `GET /v2/s/assets/f`.
#[derive(Debug, Default, Deserialize)]
pub struct AssetResponse {
    #[serde(default)]
    pub url: Option<String>,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string, a number or null and keeps it as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
