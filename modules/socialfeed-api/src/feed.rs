use std::fmt;

use async_trait::async_trait;
use tracing::info;

use instagram_client::{InstagramClient, MediaItem};
use socialfeed_common::{Config, FeedError, FeedPage, Platform, Post};
use twitter_client::{Tweet, TwitterClient};
use youtube_client::{SearchItem, YoutubeClient};

/// The account each platform adapter reads from.
const TWITTER_USERNAME: &str = "ten_met";
const YOUTUBE_CHANNEL_ID: &str = "UCg3xPZvGFCf9zW6fFNb-MNA";
const YOUTUBE_PAGE_SIZE: u32 = 5;

/// Anything that can produce one page of posts for a (platform, cursor)
/// pair. The cache wrapper and the HTTP handler both work against this seam.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, platform: Platform, cursor: &str) -> Result<FeedPage, FeedError>;
}

/// Dispatches a feed request to the matching platform adapter and
/// normalizes the result. Credentials are injected at construction; an
/// unconfigured platform reports a missing credential instead of calling out.
pub struct FeedAggregator {
    twitter: Option<TwitterClient>,
    instagram: Option<InstagramClient>,
    youtube: Option<YoutubeClient>,
}

impl FeedAggregator {
    pub fn new(config: &Config) -> Self {
        Self {
            twitter: config.twitter_bearer_token.clone().map(TwitterClient::new),
            instagram: config
                .instagram_access_token
                .clone()
                .map(InstagramClient::new),
            youtube: config.youtube_api_key.clone().map(YoutubeClient::new),
        }
    }

    /// Two sequential calls: resolve the fixed username to an id, then fetch
    /// that account's timeline, passing the cursor as the native
    /// pagination token when non-empty.
    async fn twitter_posts(&self, cursor: &str) -> Result<FeedPage, FeedError> {
        let client = self
            .twitter
            .as_ref()
            .ok_or(FeedError::CredentialMissing("Twitter Bearer Token"))?;

        let user = client.lookup_user(TWITTER_USERNAME).await.map_err(upstream)?;
        let token = (!cursor.is_empty()).then_some(cursor);
        let timeline = client.user_tweets(&user.id, token).await.map_err(upstream)?;

        let posts = timeline
            .tweets()
            .iter()
            .map(|t| tweet_to_post(TWITTER_USERNAME, t))
            .collect();
        Ok(FeedPage {
            posts,
            next_page_token: timeline.next_token().map(str::to_string),
        })
    }

    /// The media listing endpoint has no caller-side pagination: the cursor
    /// is ignored, never sent upstream, and the next cursor is always absent.
    async fn instagram_posts(&self) -> Result<FeedPage, FeedError> {
        let client = self
            .instagram
            .as_ref()
            .ok_or(FeedError::CredentialMissing("Instagram Access Token"))?;

        let media = client.list_media().await.map_err(upstream)?;
        let posts = media.items().iter().map(media_to_post).collect();
        Ok(FeedPage {
            posts,
            next_page_token: None,
        })
    }

    async fn youtube_videos(&self, cursor: &str) -> Result<FeedPage, FeedError> {
        let client = self
            .youtube
            .as_ref()
            .ok_or(FeedError::CredentialMissing("YouTube API Key"))?;

        let token = (!cursor.is_empty()).then_some(cursor);
        let results = client
            .search_channel_videos(YOUTUBE_CHANNEL_ID, YOUTUBE_PAGE_SIZE, token)
            .await
            .map_err(upstream)?;

        let posts = results
            .items
            .iter()
            .map(video_to_post)
            .collect::<Result<_, _>>()?;
        Ok(FeedPage {
            posts,
            next_page_token: results.next_page_token,
        })
    }
}

#[async_trait]
impl FeedSource for FeedAggregator {
    async fn fetch(&self, platform: Platform, cursor: &str) -> Result<FeedPage, FeedError> {
        let page = match platform {
            Platform::Twitter => self.twitter_posts(cursor).await?,
            Platform::Instagram => self.instagram_posts().await?,
            Platform::Youtube => self.youtube_videos(cursor).await?,
        };
        info!(%platform, count = page.posts.len(), "Fetched feed page from upstream");
        Ok(page)
    }
}

fn upstream(err: impl fmt::Display) -> FeedError {
    FeedError::Upstream(err.to_string())
}

// --- Normalizers: one upstream shape -> uniform Post ---

fn tweet_to_post(username: &str, tweet: &Tweet) -> Post {
    Post {
        text: Some(tweet.text.clone()),
        ..Post::new(format!("https://x.com/{}/status/{}", username, tweet.id))
    }
}

/// Caption is always emitted, empty when the post has none.
fn media_to_post(item: &MediaItem) -> Post {
    Post {
        image: Some(item.media_url.clone()),
        caption: Some(item.caption.clone().unwrap_or_default()),
        ..Post::new(item.permalink.clone())
    }
}

/// The search is scoped to `type=video`, so a hit without a video id or a
/// high-resolution thumbnail is a malformed upstream body.
fn video_to_post(item: &SearchItem) -> Result<Post, FeedError> {
    let video_id = item
        .id
        .video_id
        .as_deref()
        .ok_or_else(|| FeedError::Upstream("search result missing videoId".to_string()))?;
    let thumbnail = item
        .snippet
        .thumbnails
        .high
        .as_ref()
        .ok_or_else(|| FeedError::Upstream("search result missing high thumbnail".to_string()))?;

    Ok(Post {
        title: Some(item.snippet.title.clone()),
        thumbnail: Some(thumbnail.url.clone()),
        ..Post::new(format!("https://www.youtube.com/watch?v={}", video_id))
    })
}
