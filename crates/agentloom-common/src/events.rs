use tokio::sync::broadcast;

/// Fan-out channel for state-change notifications.
///
/// Observers that fall behind lose the oldest events (`RecvError::Lagged`);
/// publishers never block.
pub struct EventBus<E: Clone> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: E) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        One,
        Two(u32),
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Ping::One);

        assert_eq!(rx.recv().await.unwrap(), Ping::One);
    }

    #[tokio::test]
    async fn multiple_subscribers_see_same_order() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Ping::Two(1));
        bus.publish(Ping::Two(2));

        for rx in [&mut rx1, &mut rx2] {
            assert_eq!(rx.recv().await.unwrap(), Ping::Two(1));
            assert_eq!(rx.recv().await.unwrap(), Ping::Two(2));
        }
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus: EventBus<Ping> = EventBus::new(16);
        assert_eq!(bus.publish(Ping::One), 0);
    }

    #[tokio::test]
    async fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();

        assert_eq!(bus.publish(Ping::One), 2);
    }
}
