pub mod error;
pub mod types;

pub use error::{InstagramError, Result};
pub use types::{MediaItem, MediaList};

const BASE_URL: &str = "https://graph.instagram.com";

/// Fields requested from the media listing endpoint.
const MEDIA_FIELDS: &str = "id,caption,media_url,permalink";

pub struct InstagramClient {
    client: reqwest::Client,
    access_token: String,
}

impl InstagramClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
        }
    }

    /// List the authenticated account's media. The Graph API takes the
    /// access token as a query parameter, not an Authorization header.
    /// This endpoint is not paginated by the caller: one call, one page.
    pub async fn list_media(&self) -> Result<MediaList> {
        let url = format!("{}/me/media", BASE_URL);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InstagramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let media: MediaList = resp.json().await?;
        tracing::debug!(count = media.items().len(), "Fetched Instagram media list");
        Ok(media)
    }
}
