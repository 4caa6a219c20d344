use crate::types::push::Subscription;

pub trait PushSender: Clone + Send + Sync + 'static {
    type Error: DeliveryFailure + std::fmt::Display + Send + Sync + 'static;
    type Fut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    fn send<'a>(&'a self, subscription: &'a Subscription, message: &'a str) -> Self::Fut<'a>;
}

/// Classifies a failed delivery.
pub trait DeliveryFailure {
    /// True when the push service reported the endpoint as gone for good, so
    /// the subscription should be dropped.
    fn is_permanent(&self) -> bool;
}
