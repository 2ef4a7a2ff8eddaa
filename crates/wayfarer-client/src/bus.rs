//! The decoded-event bus.
//!
//! The connection driver decodes each inbound frame exactly once and
//! broadcasts the typed envelope to every subscriber. `tokio`'s broadcast
//! channel delivers every send to every live receiver, in order — which is
//! precisely the contract the projections need: **no coalescing**. Two
//! byte-identical frames in a row are two distinct game events (two ticks,
//! two hits), and a change-detecting signal that collapsed them would
//! silently drop real gameplay.

use tokio::sync::broadcast;
use wayfarer_protocol::Envelope;

/// A subscription to the inbound event stream.
///
/// Every `EventStream` sees every envelope published after it subscribed,
/// in publish order. A subscriber that falls further behind than the bus
/// capacity skips the overrun (with a warning) rather than stalling the
/// other subscribers; in practice the single session pump never lags.
pub struct EventStream {
    rx: broadcast::Receiver<Envelope>,
}

impl EventStream {
    pub(crate) fn new(rx: broadcast::Receiver<Envelope>) -> Self {
        Self { rx }
    }

    /// The next envelope, or `None` once the connection manager is gone.
    pub async fn next(&mut self) -> Option<Envelope> {
        loop {
            match self.rx.recv().await {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event stream lagged; frames were skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_protocol::GameEvent;

    fn tick(n: i64) -> Envelope {
        Envelope {
            id: "t".to_string(),
            event: GameEvent::ExpeditionCountup(n),
        }
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_every_frame_in_order() {
        let (tx, _) = broadcast::channel(16);
        let mut a = EventStream::new(tx.subscribe());
        let mut b = EventStream::new(tx.subscribe());

        for n in 0..4 {
            tx.send(tick(n)).unwrap();
        }
        drop(tx);

        for stream in [&mut a, &mut b] {
            for n in 0..4 {
                assert_eq!(stream.next().await, Some(tick(n)));
            }
            assert_eq!(stream.next().await, None);
        }
    }

    #[tokio::test]
    async fn test_identical_consecutive_frames_are_not_coalesced() {
        // A countdown can legitimately repeat the same value, and every
        // repeat must be observed.
        let (tx, _) = broadcast::channel(16);
        let mut stream = EventStream::new(tx.subscribe());

        for _ in 0..3 {
            tx.send(tick(7)).unwrap();
        }
        drop(tx);

        let mut seen = 0;
        while let Some(envelope) = stream.next().await {
            assert_eq!(envelope, tick(7));
            seen += 1;
        }
        assert_eq!(seen, 3, "identical frames must each be delivered");
    }

    #[tokio::test]
    async fn test_lagged_subscriber_skips_and_recovers() {
        let (tx, _) = broadcast::channel(2);
        let mut stream = EventStream::new(tx.subscribe());

        // Overflow the 2-slot buffer before the subscriber reads anything.
        for n in 0..5 {
            tx.send(tick(n)).unwrap();
        }

        // The oldest frames are gone; the stream resumes at the survivors
        // instead of erroring out.
        assert_eq!(stream.next().await, Some(tick(3)));
        assert_eq!(stream.next().await, Some(tick(4)));
    }
}
