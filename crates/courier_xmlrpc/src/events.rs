use futures::channel::mpsc;
use hyper::Uri;
use std::sync::Mutex;
use xmlrpc_fmt::{Fault, Value};

/// A notification broadcast by a `Client`.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// A call completed with a return value.
    Success(Value),
    /// A call completed with a fault reported by the remote peer.
    Fault(Fault),
    /// The endpoint of the client was replaced.
    EndpointChanged(Uri),
}

/// A stream of every `ClientEvent` raised after subscribing.
pub type Subscription = mpsc::UnboundedReceiver<ClientEvent>;

/// The open subscriptions of a client. Subscriptions that were dropped are pruned on the next
/// notification.
#[derive(Default)]
pub(crate) struct Subscribers(Mutex<Vec<mpsc::UnboundedSender<ClientEvent>>>);

impl Subscribers {
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        self.0
            .lock()
            .expect("Could not acquire lock on subscribers")
            .push(tx);
        rx
    }

    pub fn notify(&self, event: ClientEvent) {
        self.0
            .lock()
            .expect("Could not acquire lock on subscribers")
            .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_events() {
        let subscribers = Subscribers::default();
        let mut first = subscribers.subscribe();
        let mut second = subscribers.subscribe();

        subscribers.notify(ClientEvent::Success(Value::Int(1)));

        assert_eq!(
            first.try_next().unwrap(),
            Some(ClientEvent::Success(Value::Int(1)))
        );
        assert_eq!(
            second.try_next().unwrap(),
            Some(ClientEvent::Success(Value::Int(1)))
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let subscribers = Subscribers::default();
        let dropped = subscribers.subscribe();
        let mut kept = subscribers.subscribe();
        drop(dropped);

        subscribers.notify(ClientEvent::Fault(Fault::new(1, "gone")));

        assert_eq!(subscribers.0.lock().unwrap().len(), 1);
        assert!(kept.try_next().unwrap().is_some());
    }
}
