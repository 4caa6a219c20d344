use crate::ports::feed::SportsFeed;
use crate::ports::push::PushSender;
use crate::state;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod feed;
mod push;

pub fn app<F, S>(state: state::AppState<F, S>) -> Router
where
    F: SportsFeed,
    S: PushSender,
{
    Router::new()
        .route("/", get(health))
        .route("/live", get(feed::live_events::<F, S>))
        .route("/lineups/{event_id}", get(feed::lineups::<F, S>))
        .route(
            "/player/{event_id}/{player_name}",
            get(feed::player_stats::<F, S>),
        )
        .route("/player-image/{player_id}", get(feed::player_image::<F, S>))
        .route("/push/public-key", get(push::push_public_key::<F, S>))
        .route("/push/subscribe", post(push::push_subscribe::<F, S>))
        .route("/push/send", post(push::push_send::<F, S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub(crate) async fn health() -> &'static str {
    "Backend SofaScore OK"
}
