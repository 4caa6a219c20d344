use std::sync::Arc;

use axum::body::Bytes;
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER};
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::ports;
use crate::ports::feed::{FeedFuture, UpstreamError};
use crate::types::push::{Subscription, VapidConfig};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";
const REFERER_URL: &str = "https://www.sofascore.com/";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_IMAGE: &str = "image/*";

#[derive(Debug, Error)]
pub enum FeedSetupError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("base url cannot carry a path: {0}")]
    BaseUrl(Url),
}

/// SofaScore over HTTP. Every request carries browser-like headers; the API
/// rejects obvious bots.
#[derive(Debug, Clone)]
pub struct ReqwestSportsFeed {
    client: reqwest::Client,
    api_base: Url,
    image_base: Url,
}

impl ReqwestSportsFeed {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FeedSetupError> {
        for base in [&config.api_base_url, &config.image_base_url] {
            if base.cannot_be_a_base() {
                return Err(FeedSetupError::BaseUrl(base.clone()));
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base_url.clone(),
            image_base: config.image_base_url.clone(),
        })
    }

    async fn get(&self, url: Url, accept: &'static str) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        Ok(response)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, UpstreamError> {
        self.get(url, ACCEPT_JSON)
            .await?
            .json()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))
    }
}

impl ports::feed::SportsFeed for ReqwestSportsFeed {
    fn live_events(&self) -> FeedFuture<'_, serde_json::Value> {
        Box::pin(async move {
            let url = endpoint(&self.api_base, &["sport", "football", "events", "live"])?;
            self.get_json(url).await
        })
    }

    fn lineups<'a>(&'a self, event_id: &'a str) -> FeedFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let url = endpoint(&self.api_base, &["event", event_id, "lineups"])?;
            self.get_json(url).await
        })
    }

    fn player_image<'a>(&'a self, player_id: &'a str) -> FeedFuture<'a, Bytes> {
        Box::pin(async move {
            let url = endpoint(&self.image_base, &["player", player_id, "image"])?;
            self.get(url, ACCEPT_IMAGE)
                .await?
                .bytes()
                .await
                .map_err(|err| UpstreamError::Transport(err.to_string()))
        })
    }
}

/// Appends `segments` to `base`, percent-encoding each one so caller input
/// stays inside its own path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| UpstreamError::Transport(format!("invalid base url {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Clone)]
pub struct WebPushSender {
    vapid: VapidConfig,
    client: Arc<web_push::WebPushClient>,
}

impl WebPushSender {
    /// Fails when the client cannot be built or the private key does not
    /// decode to a P-256 key.
    pub fn new(vapid: VapidConfig) -> Result<Self, web_push::WebPushError> {
        web_push::VapidSignatureBuilder::from_base64_no_sub(
            &vapid.private_key,
            web_push::URL_SAFE_NO_PAD,
        )?;
        let client = web_push::WebPushClient::new()?;
        Ok(Self {
            vapid,
            client: Arc::new(client),
        })
    }
}

impl ports::push::PushSender for WebPushSender {
    type Error = web_push::WebPushError;
    type Fut<'a>
        = std::pin::Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn send<'a>(&'a self, subscription: &'a Subscription, message: &'a str) -> Self::Fut<'a> {
        Box::pin(async move {
            let subscription_info = web_push::SubscriptionInfo::new(
                subscription.endpoint.clone(),
                subscription.p256dh.clone(),
                subscription.auth.clone(),
            );
            let mut builder = web_push::WebPushMessageBuilder::new(&subscription_info)?;
            builder.set_payload(web_push::ContentEncoding::Aes128Gcm, message.as_bytes());
            let mut signature_builder = web_push::VapidSignatureBuilder::from_base64(
                &self.vapid.private_key,
                web_push::URL_SAFE_NO_PAD,
                &subscription_info,
            )?;
            signature_builder.add_claim("sub", self.vapid.subject.as_str());
            builder.set_vapid_signature(signature_builder.build()?);
            self.client.send(builder.build()?).await?;
            Ok(())
        })
    }
}

impl ports::push::DeliveryFailure for web_push::WebPushError {
    // 410 Gone and 404 Not Found from the push service.
    fn is_permanent(&self) -> bool {
        matches!(
            self,
            web_push::WebPushError::EndpointNotValid | web_push::WebPushError::EndpointNotFound
        )
    }
}
