use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::types::push::{Subscription, SubscriptionRequest};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("subscription has no endpoint")]
pub struct InvalidSubscription;

/// In-memory push subscriptions keyed by endpoint.
///
/// The lock is only held for the duration of a map operation, never across an
/// await point.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: Mutex<HashMap<String, Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the subscription, replacing any previous one for the same
    /// endpoint.
    pub fn register(&self, request: SubscriptionRequest) -> Result<(), InvalidSubscription> {
        let endpoint = request
            .endpoint
            .filter(|endpoint| !endpoint.trim().is_empty())
            .ok_or(InvalidSubscription)?;
        let subscription = Subscription {
            endpoint: endpoint.clone(),
            p256dh: request.keys.p256dh,
            auth: request.keys.auth,
        };
        self.lock().insert(endpoint, subscription);
        Ok(())
    }

    pub fn all(&self) -> Vec<Subscription> {
        self.lock().values().cloned().collect()
    }

    pub fn remove(&self, endpoint: &str) {
        self.lock().remove(endpoint);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Subscription>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::types::push::SubscriptionKeys;
    use std::sync::Arc;

    fn request(endpoint: &str, auth: &str) -> SubscriptionRequest {
        SubscriptionRequest {
            endpoint: Some(endpoint.to_string()),
            expiration_time: None,
            keys: SubscriptionKeys {
                p256dh: "p256".to_string(),
                auth: auth.to_string(),
            },
        }
    }

    #[test]
    fn register__should_overwrite_existing_endpoint() {
        // Given
        let registry = SubscriptionRegistry::new();

        // When
        registry
            .register(request("https://push.example/1", "first"))
            .expect("register");
        registry
            .register(request("https://push.example/1", "second"))
            .expect("register again");

        // Then
        let all = registry.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].auth, "second");
    }

    #[test]
    fn register__should_reject_missing_endpoint() {
        // Given
        let registry = SubscriptionRegistry::new();

        // When
        let missing = registry.register(SubscriptionRequest::default());
        let blank = registry.register(request("  ", "auth"));

        // Then
        assert_eq!(missing, Err(InvalidSubscription));
        assert_eq!(blank, Err(InvalidSubscription));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove__should_ignore_unknown_endpoints() {
        // Given
        let registry = SubscriptionRegistry::new();
        registry
            .register(request("https://push.example/1", "auth"))
            .expect("register");

        // When
        registry.remove("https://push.example/missing");
        registry.remove("https://push.example/1");
        registry.remove("https://push.example/1");

        // Then
        assert!(registry.is_empty());
    }

    #[test]
    fn register__should_keep_every_entry_under_concurrent_writers() {
        // Given
        let registry = Arc::new(SubscriptionRegistry::new());

        // When
        let handles: Vec<_> = (0..8)
            .map(|writer| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        let endpoint = format!("https://push.example/{writer}/{n}");
                        registry
                            .register(request(&endpoint, "auth"))
                            .expect("register");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread");
        }

        // Then
        assert_eq!(registry.len(), 400);
        assert!(
            registry
                .all()
                .iter()
                .all(|subscription| subscription.auth == "auth")
        );
    }
}
