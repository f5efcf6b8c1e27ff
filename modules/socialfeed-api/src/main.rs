use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use socialfeed_common::Config;

mod cache;
mod feed;
mod rest;

use cache::{CachedFeed, FeedCache};
use feed::FeedAggregator;

pub struct AppState {
    pub feed: CachedFeed<FeedAggregator>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("api=info".parse()?))
        .init();

    let config = Config::from_env();

    let state = Arc::new(AppState {
        feed: CachedFeed::new(FeedCache::new(), FeedAggregator::new(&config)),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Aggregated social feed
        .route("/api/social-media", get(rest::api_social_media))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only (cursors stay out of spans)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Social feed API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
