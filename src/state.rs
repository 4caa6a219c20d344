use crate::push::SubscriptionRegistry;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState<F, S> {
    pub feed: F,
    pub sender: S,
    pub subscriptions: Arc<SubscriptionRegistry>,
    pub vapid_public_key: String,
}
