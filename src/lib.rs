pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod ports;
pub mod push;
pub mod state;
pub mod stats;
pub mod types;

pub use app::app;
pub use push::generate_vapid_credentials;

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::{FeedSetupError, ReqwestSportsFeed, WebPushSender};
use crate::push::SubscriptionRegistry;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to set up upstream client: {0}")]
    Feed(#[from] FeedSetupError),
    #[error("failed to set up web push: {0}")]
    Push(web_push::WebPushError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the real adapters from `config` and serves until the listener
/// fails.
pub async fn serve(config: config::AppConfig) -> Result<(), StartupError> {
    let feed = ReqwestSportsFeed::new(&config.upstream)?;
    let sender = WebPushSender::new(config.vapid.clone()).map_err(StartupError::Push)?;
    let state = state::AppState {
        feed,
        sender,
        subscriptions: Arc::new(SubscriptionRegistry::new()),
        vapid_public_key: config.vapid.public_key.clone(),
    };

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!("listening on http://{}", config.addr);
    axum::serve(listener, app(state))
        .await
        .map_err(StartupError::Serve)
}
