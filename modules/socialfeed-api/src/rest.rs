use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::warn;

use socialfeed_common::{FeedError, Platform};

use crate::feed::FeedSource;
use crate::AppState;

#[derive(Deserialize)]
pub struct SocialMediaQuery {
    platform: Option<String>,
    #[serde(default)]
    page: String,
}

/// `GET /api/social-media?platform={twitter|instagram|youtube}&page={cursor}`
pub async fn api_social_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SocialMediaQuery>,
) -> Response {
    // Reject unknown platforms before anything touches an upstream.
    let platform = match params.platform.as_deref().unwrap_or("").parse::<Platform>() {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    match state.feed.fetch(platform, &params.page).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            warn!(%platform, error = %e, "Feed request failed");
            error_response(&e)
        }
    }
}

/// Maps the error taxonomy onto the wire contract. Upstream detail stays in
/// the logs; clients get a generic message.
fn error_response(err: &FeedError) -> Response {
    let (status, message) = match err {
        FeedError::InvalidPlatform(_) => {
            (StatusCode::BAD_REQUEST, "Invalid platform specified".to_string())
        }
        FeedError::CredentialMissing(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        FeedError::Upstream(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch posts.".to_string(),
        ),
    };
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
