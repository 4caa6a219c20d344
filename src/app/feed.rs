use crate::error::AppError;
use crate::ports::feed::{SportsFeed, UpstreamError};
use crate::ports::push::PushSender;
use crate::state::AppState;
use crate::stats;
use crate::types::stats::PlayerStatsRecord;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde_json::Value as JsonValue;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

pub(crate) async fn live_events<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
) -> Result<Json<JsonValue>, AppError> {
    let events = state
        .feed
        .live_events()
        .await
        .map_err(|err| AppError::from_upstream(err, "SofaScore blocked"))?;
    Ok(Json(events))
}

pub(crate) async fn lineups<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
    Path(event_id): Path<String>,
) -> Result<Json<JsonValue>, AppError> {
    let lineups = state
        .feed
        .lineups(&event_id)
        .await
        .map_err(|err| AppError::from_upstream(err, "Lineups unavailable"))?;
    Ok(Json(lineups))
}

pub(crate) async fn player_stats<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
    Path((event_id, player_name)): Path<(String, String)>,
) -> Result<Json<PlayerStatsRecord>, AppError> {
    let lineups = state
        .feed
        .lineups(&event_id)
        .await
        .map_err(|err| AppError::from_upstream(err, "Stats unavailable"))?;
    stats::find_player_stats(&lineups, &player_name)
        .map(Json)
        .ok_or(AppError::PlayerNotFound)
}

/// Image failures answer with an empty body; browsers only look at the status.
pub(crate) async fn player_image<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
    Path(player_id): Path<String>,
) -> Response {
    match state.feed.player_image(&player_id).await {
        Ok(image) => (
            [
                (CONTENT_TYPE, "image/jpeg"),
                (CACHE_CONTROL, IMAGE_CACHE_CONTROL),
            ],
            image,
        )
            .into_response(),
        Err(UpstreamError::Status(status)) => {
            tracing::warn!(player_id = %player_id, "player image unavailable ({status})");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err @ UpstreamError::Transport(_)) => {
            tracing::error!(player_id = %player_id, "player image failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
