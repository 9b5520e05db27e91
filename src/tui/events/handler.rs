use super::AppEvent;
use crate::core::{RevealTick, RevealTickSink};
use tokio::sync::mpsc::UnboundedSender;

/// Routes reveal ticks into the UI event loop so the controller is only
/// ever touched from that loop.
pub struct TuiRevealSink {
    sender: UnboundedSender<AppEvent>,
}

impl TuiRevealSink {
    #[must_use]
    pub const fn new(sender: UnboundedSender<AppEvent>) -> Self {
        Self { sender }
    }
}

impl RevealTickSink for TuiRevealSink {
    fn deliver(&self, tick: RevealTick) {
        let _ = self.sender.send(tick.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RevealScheduler;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_tick_becomes_app_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = TuiRevealSink::new(tx);

        sink.deliver(RevealTick { generation: 7 });

        let event = rx.recv().await.expect("Expected event");
        assert!(matches!(event, AppEvent::RevealTick(t) if t.generation == 7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_delivers_through_sink() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler =
            RevealScheduler::new(Duration::from_millis(5), Arc::new(TuiRevealSink::new(tx)));

        scheduler.schedule(RevealTick { generation: 1 });

        let event = rx.recv().await.expect("Expected event");
        assert!(matches!(event, AppEvent::RevealTick(t) if t.generation == 1));
    }

    #[test]
    fn test_deliver_after_receiver_dropped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        TuiRevealSink::new(tx).deliver(RevealTick { generation: 1 });
    }
}
