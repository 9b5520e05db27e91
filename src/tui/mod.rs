pub mod app;
pub mod events;
pub mod layout;
pub mod state;
pub mod widgets;

pub use app::{TerminalGuard, TuiApp};
pub use events::{AppEvent, TuiRevealSink};

use crate::config::AppConfig;
use crate::core::error::Result;
use crate::core::{InteractionController, RevealScheduler, SessionGateway};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn run_tui(gateway: Arc<dyn SessionGateway>, config: &AppConfig) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let sink = Arc::new(TuiRevealSink::new(event_tx.clone()));
    let scheduler = RevealScheduler::new(config.reveal_delay(), sink);
    let controller = InteractionController::new(gateway, scheduler);

    let _guard = TerminalGuard::acquire()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = TuiApp::new(controller, terminal, event_tx, event_rx);
    app.run().await
}
