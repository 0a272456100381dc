use std::sync::LazyLock;

use regex::Regex;

use crate::common::VideoId;

static TRAILING_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:/v/|/)(?<id>[a-zA-Z0-9]+)$").unwrap());
static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Pulls the canonical video identifier out of a raw ID or a share URL.
///
/// The last path segment wins when it is alphanumeric; otherwise the whole
/// input must already be an alphanumeric ID. Input is taken verbatim, so
/// callers trim whitespace themselves.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    if let Some(caps) = TRAILING_SEGMENT.captures(input) {
        return Some(VideoId::from(&caps["id"]));
    }

    if BARE_ID.is_match(input) {
        return Some(VideoId::from(input));
    }

    None
}
