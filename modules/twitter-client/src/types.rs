use serde::Deserialize;

/// Wrapper for the user lookup response (`/2/users/by/username/{username}`).
#[derive(Debug, Clone, Deserialize)]
pub struct UserLookup {
    pub data: TwitterUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One page of a user's tweet timeline (`/2/users/{id}/tweets`).
/// `data` is absent entirely when the account has no tweets.
#[derive(Debug, Clone, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub meta: Option<TimelineMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineMeta {
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Timeline {
    pub fn tweets(&self) -> &[Tweet] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn next_token(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.next_token.as_deref())
    }
}
