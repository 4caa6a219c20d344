use crate::error::AppError;
use crate::ports::feed::SportsFeed;
use crate::ports::push::PushSender;
use crate::push as push_service;
use crate::state::AppState;
use crate::types::push::{NotificationPayload, SubscriptionRequest};

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub(crate) public_key: String,
}

pub(crate) async fn push_public_key<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
) -> Json<PublicKeyResponse> {
    Json(PublicKeyResponse {
        public_key: state.vapid_public_key,
    })
}

#[derive(Serialize)]
pub(crate) struct SubscribeResponse {
    pub(crate) success: bool,
}

pub(crate) async fn push_subscribe<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
    request: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscribeResponse>), AppError> {
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!("rejected subscription body: {rejection}");
        AppError::InvalidSubscription
    })?;
    state.subscriptions.register(request)?;
    tracing::info!(
        active = state.subscriptions.len(),
        "push subscription registered"
    );
    Ok((StatusCode::CREATED, Json(SubscribeResponse { success: true })))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SendRequest {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct SendResponse {
    pub(crate) sent: usize,
    #[serde(rename = "activeSubscriptions")]
    pub(crate) active_subscriptions: usize,
}

/// A missing or unreadable body sends the default notification.
pub(crate) async fn push_send<F: SportsFeed, S: PushSender>(
    State(state): State<AppState<F, S>>,
    request: Result<Json<SendRequest>, JsonRejection>,
) -> Json<SendResponse> {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let payload = NotificationPayload::new(request.title, request.body);
    let report = push_service::broadcast(&state.sender, &state.subscriptions, &payload).await;
    tracing::info!(
        sent = report.sent,
        failed = report.failed,
        pruned = report.pruned,
        active = report.active,
        "push broadcast finished"
    );
    Json(SendResponse {
        sent: report.sent,
        active_subscriptions: report.active,
    })
}
