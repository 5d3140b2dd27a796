//! Giphy search response payload and its projection onto displayed result items.

use crate::error::{GiflensError, Result};
use serde::{Deserialize, Deserializer};

/// Top-level search response. Only `data` matters; a missing or null `data` means no results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub data: Option<Vec<GifRecord>>,
}

/// One gif record as returned by the API. Explicit `null` fields decode as their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GifRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Link to the gif's Giphy page (not the image itself).
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: GifImages,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GifImages {
    #[serde(deserialize_with = "null_as_default")]
    pub original: ImageRendition,
    #[serde(deserialize_with = "null_as_default")]
    pub downsized: ImageRendition,
}

/// Giphy reports dimensions and sizes as strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageRendition {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub height: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What the result list shows for each gif.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    pub display_url: String,
}

impl SearchPayload {
    /// Decode a response body. A body that is not a JSON object (including `null`) is an error.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|err| GiflensError::decode("response is not a search payload", err))
    }

    /// Project the records onto result items, keeping response order.
    pub fn into_items(self) -> Vec<ResultItem> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(ResultItem::from)
            .collect()
    }
}

impl From<GifRecord> for ResultItem {
    fn from(record: GifRecord) -> Self {
        let GifImages {
            original,
            downsized,
        } = record.images;
        let display_url = if original.url.is_empty() {
            downsized.url
        } else {
            original.url
        };

        Self {
            id: record.id,
            title: record.title,
            display_url,
        }
    }
}
