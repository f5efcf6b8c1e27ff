use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// The closed set of upstream platforms the aggregator knows about.
/// Anything else is rejected before any adapter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    Instagram,
    Youtube,
}

impl Platform {
    /// Canonical lowercase name, used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FeedError;

    // Exact match only: `Twitter` and `TWITTER` are invalid, same as any
    // other unrecognized value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::Youtube),
            other => Err(FeedError::InvalidPlatform(other.to_string())),
        }
    }
}

/// A normalized post from any platform. `url` is always present; the rest
/// depends on the platform and is omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Post {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: None,
            caption: None,
            title: None,
            image: None,
            thumbnail: None,
        }
    }
}

/// One page of aggregated posts. `next_page_token` serializes as `null`
/// when the platform has no further pages (or never paginates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_exact_lowercase_names() {
        assert_eq!("twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("instagram".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("youtube".parse::<Platform>().unwrap(), Platform::Youtube);
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = "facebook".parse::<Platform>().unwrap_err();
        assert!(matches!(err, FeedError::InvalidPlatform(_)));
    }

    #[test]
    fn mixed_case_platform_is_rejected() {
        assert!("Twitter".parse::<Platform>().is_err());
        assert!("TWITTER".parse::<Platform>().is_err());
        assert!("Instagram".parse::<Platform>().is_err());
        assert!("YouTube".parse::<Platform>().is_err());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let post = Post {
            text: Some("hello".to_string()),
            ..Post::new("https://x.com/ten_met/status/1")
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://x.com/ten_met/status/1", "text": "hello"})
        );
    }

    #[test]
    fn next_page_token_serializes_as_null_when_absent() {
        let page = FeedPage { posts: vec![], next_page_token: None };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({"posts": [], "next_page_token": null}));
    }
}
