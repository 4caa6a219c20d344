use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "Live match update";
const DEFAULT_BODY: &str = "Something happened in a match you follow.";

#[derive(Debug, Clone)]
pub struct VapidConfig {
    pub private_key: String,
    pub public_key: String,
    pub subject: String,
}

/// A browser push endpoint together with the keys needed to encrypt for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// The JSON a browser produces from `PushSubscription.toJSON()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub expiration_time: Option<serde_json::Value>,
    #[serde(default)]
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionKeys {
    #[serde(default)]
    pub p256dh: String,
    #[serde(default)]
    pub auth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

impl NotificationPayload {
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
        }
    }

    /// Text handed to the service worker's `push` event.
    pub fn to_message(&self) -> String {
        serde_json::json!({ "title": self.title, "body": self.body }).to_string()
    }
}

impl Default for NotificationPayload {
    fn default() -> Self {
        Self::new(None, None)
    }
}
