pub mod dispatch;
pub mod registry;
pub mod vapid;

pub use dispatch::{BroadcastReport, broadcast};
pub use registry::{InvalidSubscription, SubscriptionRegistry};
pub use vapid::{VapidConfigStatus, VapidCredentials, generate_vapid_credentials, load_vapid_config};
