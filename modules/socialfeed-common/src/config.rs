use std::env;

/// Application configuration loaded from environment variables.
///
/// Platform credentials are optional: a missing one disables that platform
/// at request time (the adapter reports it), it does not abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Upstream credentials
    pub twitter_bearer_token: Option<String>,
    pub instagram_access_token: Option<String>,
    pub youtube_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            twitter_bearer_token: optional_env("TWITTER_BEARER_TOKEN"),
            instagram_access_token: optional_env("INSTAGRAM_ACCESS_TOKEN"),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
        }
    }
}

/// Treat unset and empty the same way: both mean "not configured".
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
