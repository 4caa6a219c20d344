use serde::Serialize;

use crate::ports::push::{DeliveryFailure, PushSender};
use crate::push::registry::SubscriptionRegistry;
use crate::types::push::NotificationPayload;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    pub sent: usize,
    pub failed: usize,
    pub pruned: usize,
    pub active: usize,
}

/// Sends `payload` once to every subscription in a snapshot of the registry.
///
/// Failures never stop the loop. Endpoints the push service reports as gone
/// are removed; any other failure leaves the subscription in place.
pub async fn broadcast<S: PushSender>(
    sender: &S,
    registry: &SubscriptionRegistry,
    payload: &NotificationPayload,
) -> BroadcastReport {
    let message = payload.to_message();
    let mut report = BroadcastReport::default();

    for subscription in registry.all() {
        match sender.send(&subscription, &message).await {
            Ok(()) => report.sent += 1,
            Err(err) if err.is_permanent() => {
                report.failed += 1;
                report.pruned += 1;
                registry.remove(&subscription.endpoint);
                tracing::info!(
                    endpoint = %subscription.endpoint,
                    "removed expired push subscription ({err})"
                );
            }
            Err(err) => {
                report.failed += 1;
                tracing::warn!(
                    endpoint = %subscription.endpoint,
                    "push delivery error: {err}"
                );
            }
        }
    }

    report.active = registry.len();
    report
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::types::push::{Subscription, SubscriptionKeys, SubscriptionRequest};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy)]
    enum TestSendError {
        Gone,
        Unavailable,
    }

    impl std::fmt::Display for TestSendError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                TestSendError::Gone => f.write_str("endpoint gone"),
                TestSendError::Unavailable => f.write_str("service unavailable"),
            }
        }
    }

    impl DeliveryFailure for TestSendError {
        fn is_permanent(&self) -> bool {
            matches!(self, TestSendError::Gone)
        }
    }

    #[derive(Clone, Default)]
    struct TestSender {
        failures: Arc<HashMap<String, TestSendError>>,
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl TestSender {
        fn failing(failures: &[(&str, TestSendError)]) -> Self {
            Self {
                failures: Arc::new(
                    failures
                        .iter()
                        .map(|(endpoint, err)| (endpoint.to_string(), *err))
                        .collect(),
                ),
                ..Default::default()
            }
        }
    }

    impl PushSender for TestSender {
        type Error = TestSendError;
        type Fut<'a>
            = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
        where
            Self: 'a;

        fn send<'a>(&'a self, subscription: &'a Subscription, message: &'a str) -> Self::Fut<'a> {
            Box::pin(async move {
                if let Some(err) = self.failures.get(&subscription.endpoint) {
                    return Err(*err);
                }
                self.sent
                    .lock()
                    .expect("sent lock")
                    .push((subscription.endpoint.clone(), message.to_string()));
                Ok(())
            })
        }
    }

    fn registry_with(endpoints: &[&str]) -> SubscriptionRegistry {
        let registry = SubscriptionRegistry::new();
        for endpoint in endpoints {
            registry
                .register(SubscriptionRequest {
                    endpoint: Some(endpoint.to_string()),
                    expiration_time: None,
                    keys: SubscriptionKeys {
                        p256dh: "p256".to_string(),
                        auth: "auth".to_string(),
                    },
                })
                .expect("register");
        }
        registry
    }

    #[tokio::test]
    async fn broadcast__should_report_zero_for_empty_registry() {
        // Given
        let registry = SubscriptionRegistry::new();
        let sender = TestSender::default();

        // When
        let report = broadcast(&sender, &registry, &NotificationPayload::default()).await;

        // Then
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn broadcast__should_deliver_payload_to_every_subscription() {
        // Given
        let registry = registry_with(&["https://push.example/1", "https://push.example/2"]);
        let sender = TestSender::default();
        let payload = NotificationPayload::new(Some("Goal!".to_string()), Some("1-0".to_string()));

        // When
        let report = broadcast(&sender, &registry, &payload).await;

        // Then
        assert_eq!(report.sent, 2);
        assert_eq!(report.active, 2);
        let sent = sender.sent.lock().expect("sent lock").clone();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, message)| *message == payload.to_message()));
    }

    #[tokio::test]
    async fn broadcast__should_prune_gone_endpoints_and_keep_transient_failures() {
        // Given
        let registry = registry_with(&[
            "https://push.example/ok",
            "https://push.example/gone",
            "https://push.example/flaky",
        ]);
        let sender = TestSender::failing(&[
            ("https://push.example/gone", TestSendError::Gone),
            ("https://push.example/flaky", TestSendError::Unavailable),
        ]);

        // When
        let report = broadcast(&sender, &registry, &NotificationPayload::default()).await;

        // Then
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.pruned, 1);
        assert_eq!(report.sent + report.failed, 3);
        assert_eq!(report.active, 2);
        let mut remaining: Vec<_> = registry
            .all()
            .into_iter()
            .map(|subscription| subscription.endpoint)
            .collect();
        remaining.sort();
        assert_eq!(
            remaining,
            vec!["https://push.example/flaky", "https://push.example/ok"]
        );
    }
}
