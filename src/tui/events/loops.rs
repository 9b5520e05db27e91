use super::{AppEvent, SCROLL_DELTA, TICK_INTERVAL};
use crate::core::error::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind, MouseEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;

pub async fn terminal_event_loop(tx: UnboundedSender<AppEvent>) -> Result<()> {
    let mut reader = EventStream::new();

    while let Some(event) = reader.next().await {
        if let Some(app_event) = translate_terminal_event(event?)
            && tx.send(app_event).is_err()
        {
            break;
        }
    }
    Ok(())
}

/// Maps raw terminal input to app events. Key releases and repeats from
/// terminals that report them are dropped.
#[must_use]
pub fn translate_terminal_event(event: CrosstermEvent) -> Option<AppEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Input(key)),
        CrosstermEvent::Paste(text) => Some(AppEvent::Paste(text)),
        CrosstermEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(AppEvent::MouseScroll(-SCROLL_DELTA)),
            MouseEventKind::ScrollDown => Some(AppEvent::MouseScroll(SCROLL_DELTA)),
            _ => None,
        },
        _ => None,
    }
}

pub async fn tick_loop(tx: UnboundedSender<AppEvent>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).is_err() {
            break;
        }
    }
}
