//! Typing animation for the latest assistant turn.
//!
//! [`Reveal`] is the pure cursor state machine. [`RevealScheduler`] owns the
//! single pending timer task that delivers the next [`RevealTick`] back to
//! whoever drives the state machine. Every arm bumps the generation so a tick
//! from an abandoned reveal can never advance a newer cursor.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTick {
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCursor {
    target: usize,
    revealed: usize,
    len: usize,
}

impl RevealCursor {
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Idle,
    Revealing(RevealCursor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more character is visible; another tick is needed.
    Advanced,
    /// The full text is visible and the cursor went idle.
    Finished,
    /// The tick belonged to an earlier reveal.
    Stale,
    /// Nothing is being revealed.
    Idle,
}

#[derive(Debug, Default)]
pub struct Reveal {
    state: RevealState,
    generation: u64,
}

impl Reveal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts revealing `target` from zero, abandoning any reveal in progress.
    pub const fn arm(&mut self, target: usize, len: usize) -> RevealTick {
        self.generation = self.generation.wrapping_add(1);
        self.state = RevealState::Revealing(RevealCursor {
            target,
            revealed: 0,
            len,
        });
        RevealTick {
            generation: self.generation,
        }
    }

    pub const fn tick(&mut self, tick: RevealTick) -> TickOutcome {
        if tick.generation != self.generation {
            return TickOutcome::Stale;
        }

        let RevealState::Revealing(mut cursor) = self.state else {
            return TickOutcome::Idle;
        };

        if cursor.revealed < cursor.len {
            cursor.revealed += 1;
        }

        if cursor.revealed >= cursor.len {
            self.state = RevealState::Idle;
            TickOutcome::Finished
        } else {
            self.state = RevealState::Revealing(cursor);
            TickOutcome::Advanced
        }
    }

    /// Drops the current reveal; the target turn then displays in full.
    pub const fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = RevealState::Idle;
    }

    #[must_use]
    pub const fn state(&self) -> RevealState {
        self.state
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<RevealCursor> {
        match self.state {
            RevealState::Revealing(cursor) => Some(cursor),
            RevealState::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_revealing(&self) -> bool {
        matches!(self.state, RevealState::Revealing(_))
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of visible characters for `index`, or `None` when it shows in full.
    #[must_use]
    pub const fn visible_chars(&self, index: usize) -> Option<usize> {
        match self.state {
            RevealState::Revealing(cursor) if cursor.target == index => Some(cursor.revealed),
            _ => None,
        }
    }
}

pub trait RevealTickSink: Send + Sync {
    fn deliver(&self, tick: RevealTick);
}

impl RevealTickSink for UnboundedSender<RevealTick> {
    fn deliver(&self, tick: RevealTick) {
        let _ = self.send(tick);
    }
}

/// Holds at most one pending tick task. Scheduling replaces (aborts) the
/// previous task, and dropping the scheduler aborts whatever is pending.
pub struct RevealScheduler {
    delay: Duration,
    sink: Arc<dyn RevealTickSink>,
    pending: Option<JoinHandle<()>>,
}

impl RevealScheduler {
    #[must_use]
    pub fn new(delay: Duration, sink: Arc<dyn RevealTickSink>) -> Self {
        Self {
            delay,
            sink,
            pending: None,
        }
    }

    #[must_use]
    pub fn with_channel(delay: Duration, tx: UnboundedSender<RevealTick>) -> Self {
        Self::new(delay, Arc::new(tx))
    }

    pub fn schedule(&mut self, tick: RevealTick) {
        self.cancel();

        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.deliver(tick);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for RevealScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn run_to_completion(reveal: &mut Reveal, tick: RevealTick) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match reveal.tick(tick) {
                TickOutcome::Advanced => {}
                _ => return ticks,
            }
        }
    }

    #[test]
    fn new_reveal_is_idle() {
        let reveal = Reveal::new();
        assert_eq!(reveal.state(), RevealState::Idle);
        assert!(reveal.cursor().is_none());
        assert_eq!(reveal.visible_chars(0), None);
    }

    #[test]
    fn arm_starts_at_zero() {
        let mut reveal = Reveal::new();
        reveal.arm(3, 5);

        let cursor = reveal.cursor().expect("revealing");
        assert_eq!(cursor.target(), 3);
        assert_eq!(cursor.revealed(), 0);
        assert_eq!(cursor.len(), 5);
        assert_eq!(reveal.visible_chars(3), Some(0));
        assert_eq!(reveal.visible_chars(2), None);
    }

    #[test]
    fn ticks_advance_one_char_until_idle() {
        let mut reveal = Reveal::new();
        let tick = reveal.arm(1, 3);

        assert_eq!(reveal.tick(tick), TickOutcome::Advanced);
        assert_eq!(reveal.visible_chars(1), Some(1));
        assert_eq!(reveal.tick(tick), TickOutcome::Advanced);
        assert_eq!(reveal.visible_chars(1), Some(2));
        assert_eq!(reveal.tick(tick), TickOutcome::Finished);
        assert!(!reveal.is_revealing());
        assert_eq!(reveal.visible_chars(1), None);
    }

    #[test]
    fn revealed_never_exceeds_len() {
        let mut reveal = Reveal::new();
        let tick = reveal.arm(0, 4);

        for _ in 0..10 {
            reveal.tick(tick);
            if let Some(cursor) = reveal.cursor() {
                assert!(cursor.revealed() <= cursor.len());
            }
        }
        assert!(!reveal.is_revealing());
    }

    #[test]
    fn ticks_after_full_reveal_are_noops() {
        let mut reveal = Reveal::new();
        let tick = reveal.arm(0, 2);
        assert_eq!(run_to_completion(&mut reveal, tick), 2);

        assert_eq!(reveal.tick(tick), TickOutcome::Idle);
        assert_eq!(reveal.tick(tick), TickOutcome::Idle);
        assert_eq!(reveal.state(), RevealState::Idle);
    }

    #[test]
    fn empty_text_finishes_on_first_tick() {
        let mut reveal = Reveal::new();
        let tick = reveal.arm(0, 0);
        assert_eq!(reveal.tick(tick), TickOutcome::Finished);
    }

    #[test]
    fn rearm_invalidates_previous_ticks() {
        let mut reveal = Reveal::new();
        let old = reveal.arm(1, 10);
        reveal.tick(old);

        let new = reveal.arm(3, 4);
        assert_ne!(old, new);
        assert_eq!(reveal.tick(old), TickOutcome::Stale);
        assert_eq!(reveal.visible_chars(3), Some(0));
        assert_eq!(reveal.visible_chars(1), None);

        assert_eq!(reveal.tick(new), TickOutcome::Advanced);
        assert_eq!(reveal.visible_chars(3), Some(1));
    }

    #[test]
    fn cancel_makes_outstanding_tick_stale() {
        let mut reveal = Reveal::new();
        let tick = reveal.arm(0, 5);
        reveal.cancel();

        assert_eq!(reveal.tick(tick), TickOutcome::Stale);
        assert!(!reveal.is_revealing());
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RevealScheduler::with_channel(Duration::from_millis(5), tx);

        scheduler.schedule(RevealTick { generation: 7 });
        assert!(scheduler.has_pending());

        let tick = rx.recv().await.expect("tick delivered");
        assert_eq!(tick.generation, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_aborts_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RevealScheduler::with_channel(Duration::from_millis(5), tx);

        scheduler.schedule(RevealTick { generation: 1 });
        scheduler.schedule(RevealTick { generation: 2 });

        let tick = rx.recv().await.expect("tick delivered");
        assert_eq!(tick.generation, 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_cancels_pending_tick() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RevealScheduler::with_channel(Duration::from_millis(5), tx);
        scheduler.schedule(RevealTick { generation: 1 });
        drop(scheduler);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.recv().await.is_none());
    }
}
