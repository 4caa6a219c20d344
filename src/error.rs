//! Request-boundary errors and their JSON envelopes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::ports::feed::UpstreamError;
use crate::push::InvalidSubscription;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("upstream unavailable ({status}): {message}")]
    Upstream {
        status: StatusCode,
        message: &'static str,
    },
    #[error("upstream transport failure: {0}")]
    Transport(String),
    #[error("player not found")]
    PlayerNotFound,
    #[error("invalid subscription")]
    InvalidSubscription,
}

impl AppError {
    /// Maps a feed failure, using `message` when the upstream answered with
    /// an error status.
    pub fn from_upstream(err: UpstreamError, message: &'static str) -> Self {
        match err {
            UpstreamError::Status(status) => AppError::Upstream { status, message },
            UpstreamError::Transport(cause) => AppError::Transport(cause),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { status, .. } => *status,
            AppError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PlayerNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidSubscription => StatusCode::BAD_REQUEST,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::Upstream { message, .. } => *message,
            AppError::Transport(_) => "internal error",
            AppError::PlayerNotFound => "Player not found",
            AppError::InvalidSubscription => "Invalid subscription",
        }
    }
}

impl From<InvalidSubscription> for AppError {
    fn from(_: InvalidSubscription) -> Self {
        AppError::InvalidSubscription
    }
}

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream { .. } => tracing::warn!("{self}"),
            AppError::Transport(_) => tracing::error!("{self}"),
            AppError::PlayerNotFound | AppError::InvalidSubscription => {
                tracing::debug!("{self}")
            }
        }
        (
            self.status(),
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
