use serde::Deserialize;

/// Response of the `/me/media` listing. `data` is absent when the account
/// has no media.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaList {
    #[serde(default)]
    pub data: Option<Vec<MediaItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub media_url: String,
    pub permalink: String,
}

impl MediaList {
    pub fn items(&self) -> &[MediaItem] {
        self.data.as_deref().unwrap_or_default()
    }
}
