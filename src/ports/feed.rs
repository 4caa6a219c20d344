use std::pin::Pin;

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

pub type FeedFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, UpstreamError>> + Send + 'a>>;

#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("upstream responded with {0}")]
    Status(StatusCode),
    #[error("upstream request failed: {0}")]
    Transport(String),
}

/// Read access to the sports-data API.
pub trait SportsFeed: Clone + Send + Sync + 'static {
    fn live_events(&self) -> FeedFuture<'_, serde_json::Value>;
    fn lineups<'a>(&'a self, event_id: &'a str) -> FeedFuture<'a, serde_json::Value>;
    fn player_image<'a>(&'a self, player_id: &'a str) -> FeedFuture<'a, Bytes>;
}
