pub mod error;
pub mod types;

pub use error::{Result, TwitterError};
pub use types::{Timeline, TimelineMeta, Tweet, TwitterUser, UserLookup};

const BASE_URL: &str = "https://api.twitter.com/2";

pub struct TwitterClient {
    client: reqwest::Client,
    bearer_token: String,
}

impl TwitterClient {
    pub fn new(bearer_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token,
        }
    }

    /// Resolve a username to its numeric account id.
    pub async fn lookup_user(&self, username: &str) -> Result<TwitterUser> {
        let url = format!("{}/users/by/username/{}", BASE_URL, username);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let lookup: UserLookup = resp.json().await?;
        tracing::debug!(username, user_id = %lookup.data.id, "Resolved Twitter user");
        Ok(lookup.data)
    }

    /// Fetch one page of a user's tweet timeline. `pagination_token` is the
    /// continuation token from a previous page's `meta.next_token`; omit it
    /// for the first page.
    pub async fn user_tweets(
        &self,
        user_id: &str,
        pagination_token: Option<&str>,
    ) -> Result<Timeline> {
        let url = format!("{}/users/{}/tweets", BASE_URL, user_id);
        let mut req = self.client.get(&url).bearer_auth(&self.bearer_token);
        if let Some(token) = pagination_token {
            req = req.query(&[("pagination_token", token)]);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let timeline: Timeline = resp.json().await?;
        tracing::debug!(
            user_id,
            count = timeline.tweets().len(),
            has_next = timeline.next_token().is_some(),
            "Fetched tweet timeline page"
        );
        Ok(timeline)
    }
}
