mod handler;
mod loops;

pub use handler::TuiRevealSink;
pub use loops::{terminal_event_loop, tick_loop, translate_terminal_event};

use crate::core::{CompletedReply, RevealTick};
use crossterm::event::KeyEvent;
use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_millis(80);
pub const SCROLL_DELTA: i16 = 3;

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Paste(String),
    MouseScroll(i16),
    Resize(u16, u16),
    /// Spinner frame.
    Tick,
    RevealTick(RevealTick),
    ReplyCompleted(CompletedReply),
}

impl From<RevealTick> for AppEvent {
    fn from(tick: RevealTick) -> Self {
        Self::RevealTick(tick)
    }
}

impl From<CompletedReply> for AppEvent {
    fn from(reply: CompletedReply) -> Self {
        Self::ReplyCompleted(reply)
    }
}
