pub mod error;
pub mod types;

pub use error::{Result, YoutubeError};
pub use types::{SearchItem, SearchItemId, SearchResults, Snippet, Thumbnail, Thumbnails};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YoutubeClient {
    client: reqwest::Client,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Search a channel's videos, newest first. `page_token` is the
    /// continuation token from a previous page; omit it for the first page.
    pub async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<SearchResults> {
        let url = format!("{}/search", BASE_URL);
        let max_results = max_results.to_string();
        let mut params = vec![
            ("key", self.api_key.as_str()),
            ("channelId", channel_id),
            ("part", "snippet"),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp = self.client.get(&url).query(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let results: SearchResults = resp.json().await?;
        tracing::debug!(
            channel_id,
            count = results.items.len(),
            has_next = results.next_page_token.is_some(),
            "Fetched YouTube search page"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_results_parse_camel_case_fields() {
        let results: SearchResults = serde_json::from_str(
            r#"{
                "items": [
                    {"id": {"videoId": "v1"},
                     "snippet": {"title": "T", "thumbnails": {"high": {"url": "http://img"}}}}
                ],
                "nextPageToken": "tok"
            }"#,
        )
        .unwrap();
        assert_eq!(results.items[0].id.video_id.as_deref(), Some("v1"));
        assert_eq!(results.next_page_token.as_deref(), Some("tok"));
    }

    #[test]
    fn missing_thumbnails_default_to_none() {
        let results: SearchResults = serde_json::from_str(
            r#"{"items": [{"id": {}, "snippet": {"title": "T"}}]}"#,
        )
        .unwrap();
        assert!(results.items[0].snippet.thumbnails.high.is_none());
        assert!(results.items[0].id.video_id.is_none());
    }
}
