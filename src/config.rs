use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;

use crate::types::push::VapidConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "https://api.sofascore.com/api/v1";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://api.sofascore.app/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VAPID_SUBJECT: &str = "mailto:admin@example.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub upstream: UpstreamConfig,
    pub vapid: VapidConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_base_url: Url,
    pub image_base_url: Url,
    pub timeout: Duration,
}

#[cfg(test)]
impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|err| panic!("invalid default api url: {err}")),
            image_base_url: Url::parse(DEFAULT_IMAGE_BASE_URL)
                .unwrap_or_else(|err| panic!("invalid default image url: {err}")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            upstream: UpstreamConfig::default(),
            vapid: VapidConfig {
                private_key: "private".to_string(),
                public_key: "public".to_string(),
                subject: "mailto:ops@example.com".to_string(),
            },
        }
    }
}
