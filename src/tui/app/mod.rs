mod commands;
mod render;
mod terminal;

pub use commands::SLASH_COMMANDS;
pub use terminal::TerminalGuard;

use crate::core::error::Result;
use crate::core::{
    ChatError, CompletedReply, InteractionController, SubmitOutcome, SubmitRejection,
};
use crate::tui::events::{AppEvent, terminal_event_loop, tick_loop};
use crate::tui::layout::calculate_layout;
use crate::tui::state::AppState;
use crate::tui::widgets::{ChatEntry, ChatWidget, InputAction, InputWidget, suggestion_for_key};
use crate::ui::{Notice, clipboard};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use commands::{HELP_TEXT, SlashCommand};
use render::{StatusView, render_header, render_notice, render_status};

const PAGE_SCROLL: usize = 10;

pub struct TuiApp<B: Backend> {
    controller: InteractionController,
    terminal: Terminal<B>,
    state: AppState,
    input_widget: InputWidget<'static>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    clipboard: Box<dyn Write + Send>,
    session_attempted: bool,
    request_task: Option<JoinHandle<()>>,
    background: Vec<JoinHandle<()>>,
}

impl<B: Backend> TuiApp<B> {
    /// `event_tx` must be the sender the controller's reveal scheduler
    /// delivers into, so ticks and replies share one loop.
    pub fn new(
        controller: InteractionController,
        terminal: Terminal<B>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        Self {
            controller,
            terminal,
            state: AppState::new(),
            input_widget: InputWidget::new(),
            event_rx,
            event_tx,
            clipboard: Box::new(io::stdout()),
            session_attempted: false,
            request_task: None,
            background: Vec::new(),
        }
    }

    /// Where OSC 52 copy sequences are written. Defaults to stdout.
    #[must_use]
    pub fn with_clipboard(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.clipboard = writer;
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        self.spawn_background_loops();

        self.draw()?;
        self.initialize().await;

        let result = self.event_loop().await;
        self.shutdown();
        result
    }

    fn spawn_background_loops(&mut self) {
        let tx = self.event_tx.clone();
        self.background.push(tokio::spawn(async move {
            if let Err(e) = terminal_event_loop(tx).await {
                tracing::error!(error = %e, "Terminal event loop stopped");
            }
        }));

        let tx = self.event_tx.clone();
        self.background.push(tokio::spawn(tick_loop(tx)));
    }

    async fn initialize(&mut self) {
        if let Err(e) = self.controller.initialize().await {
            tracing::debug!(error = %e, "Continuing without a chat session");
        }
        self.session_attempted = true;
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.draw()?;

            let Some(event) = self.event_rx.recv().await else {
                break;
            };
            self.handle_event(event);

            // Coalesce bursts (reveal ticks, pastes) into a single redraw.
            while !self.state.should_quit {
                match self.event_rx.try_recv() {
                    Ok(event) => self.handle_event(event),
                    Err(_) => break,
                }
            }
        }

        Ok(())
    }

    fn shutdown(&mut self) {
        for handle in self.background.drain(..) {
            handle.abort();
        }
        if let Some(task) = self.request_task.take() {
            task.abort();
        }
        self.controller.teardown();
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            controller,
            terminal,
            state,
            input_widget,
            session_attempted,
            ..
        } = self;

        let entries = chat_entries(controller);
        let pending = controller.show_pending_placeholder();
        let status = status_view(controller, state, *session_attempted);
        let model = controller.gateway().model();
        let spinner_frame = state.spinner_frame;
        let input_lines = input_widget.line_count();

        terminal.draw(|f| {
            let layout = calculate_layout(f.area(), input_lines);

            render_header(f, layout.header, model);

            ChatWidget::new(&entries, &mut state.scroll, pending, spinner_frame)
                .render(layout.chat, f.buffer_mut());

            input_widget.render(layout.input, f);

            render_status(f, layout.status, status, spinner_frame);

            if let Some(notice) = &state.notice {
                render_notice(f, layout.chat, notice);
            }
        })?;

        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(key) => self.handle_key_input(key),
            AppEvent::Paste(text) => {
                let action = self.input_widget.handle_paste(&text);
                self.handle_input_action(action);
            }
            AppEvent::Resize(_w, _h) => {}
            AppEvent::MouseScroll(delta) => {
                let lines = usize::from(delta.unsigned_abs());
                if delta < 0 {
                    self.state.scroll_up(lines);
                } else {
                    self.state.scroll_down(lines);
                }
            }
            AppEvent::Tick => self.state.tick(),
            AppEvent::RevealTick(tick) => {
                self.controller.on_reveal_tick(tick);
            }
            AppEvent::ReplyCompleted(reply) => self.finish_reply(reply),
        }

        self.input_widget.set_enabled(!self.controller.is_busy());
    }

    fn handle_key_input(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                if self.input_widget.is_empty() {
                    self.state.quit();
                } else {
                    self.input_widget.clear();
                }
                return;
            }
            KeyCode::Char('d') if ctrl => {
                if self.input_widget.is_empty() {
                    self.state.quit();
                }
                return;
            }
            KeyCode::Char('y') if ctrl => {
                self.copy_latest_reply();
                return;
            }
            KeyCode::Esc => {
                self.state.dismiss_notice();
                return;
            }
            KeyCode::PageUp => {
                self.state.scroll_up(PAGE_SCROLL);
                return;
            }
            KeyCode::PageDown => {
                self.state.scroll_down(PAGE_SCROLL);
                return;
            }
            KeyCode::Home if ctrl => {
                self.state.scroll_to_top();
                return;
            }
            KeyCode::End if ctrl => {
                self.state.scroll_to_bottom();
                return;
            }
            KeyCode::Char(c) if key.modifiers == KeyModifiers::NONE && self.can_pick_suggestion() => {
                if let Some(prompt) = suggestion_for_key(c) {
                    self.submit_message(prompt.to_string());
                    return;
                }
            }
            _ => {}
        }

        let action = self.input_widget.handle_key(key);
        self.handle_input_action(action);
    }

    /// Suggestion cards are only on screen for an empty conversation.
    fn can_pick_suggestion(&self) -> bool {
        self.input_widget.is_empty()
            && self.controller.turns().is_empty()
            && self.controller.is_ready()
            && !self.controller.is_busy()
    }

    fn handle_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::Continue => {}

            InputAction::Submit(text) => match SlashCommand::parse(&text) {
                Some(command) => self.handle_slash_command(command),
                None => self.submit_message(text),
            },

            InputAction::HistoryPrev => {
                let current = self.input_widget.text();
                if let Some(text) = self.state.history.prev(&current) {
                    self.input_widget.set_text(&text);
                }
            }

            InputAction::HistoryNext => {
                if let Some(text) = self.state.history.next() {
                    self.input_widget.set_text(&text);
                }
            }
        }
    }

    fn handle_slash_command(&mut self, command: SlashCommand) {
        match command {
            SlashCommand::Help => self.state.show_notice(Notice::info(HELP_TEXT)),
            SlashCommand::Copy => self.copy_latest_reply(),
            SlashCommand::Exit => self.state.quit(),
            SlashCommand::Unknown(cmd) => self.state.show_notice(Notice::error(format!(
                "Unknown command: {cmd}. Type /help for available commands."
            ))),
        }
    }

    fn submit_message(&mut self, text: String) {
        match self.controller.begin_submit(&text) {
            Ok(pending) => {
                self.state.history.push(text);
                self.state.dismiss_notice();
                self.state.start_request();

                let tx = self.event_tx.clone();
                self.request_task = Some(tokio::spawn(async move {
                    let completed = pending.run().await;
                    let _ = tx.send(completed.into());
                }));
            }
            Err(rejection) => self.reject_submit(rejection, &text),
        }
    }

    fn reject_submit(&mut self, rejection: SubmitRejection, text: &str) {
        let notice = match rejection {
            SubmitRejection::EmptyMessage => return,
            SubmitRejection::NotReady => {
                Notice::error("Chat is offline. Restart gemini-chat to try again.")
            }
            SubmitRejection::Busy => Notice::info("Still waiting for the previous reply."),
        };

        if self.input_widget.is_empty() {
            self.input_widget.set_text(text);
        }
        self.state.show_notice(notice);
    }

    fn finish_reply(&mut self, reply: CompletedReply) {
        self.request_task = None;
        self.state.finish_request();

        match self.controller.finish_submit(reply) {
            SubmitOutcome::Dropped(ChatError::EmptyReply) => {
                self.state
                    .show_notice(Notice::info("Gemini returned an empty reply."));
            }
            SubmitOutcome::Dropped(error) => {
                self.state.show_notice(Notice::error(error.to_string()));
            }
            SubmitOutcome::Replied { .. }
            | SubmitOutcome::Failed { .. }
            | SubmitOutcome::Rejected(_)
            | SubmitOutcome::Stale => {}
        }
    }

    fn copy_latest_reply(&mut self) {
        let Some(text) = self.controller.latest_assistant_text() else {
            self.state.show_notice(Notice::info("Nothing to copy yet."));
            return;
        };

        let result = clipboard::copy_to(&mut self.clipboard, text);
        match result {
            Ok(()) => self
                .state
                .show_notice(Notice::success("Copied the latest reply to the clipboard.")),
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard copy failed");
                self.state
                    .show_notice(Notice::error(format!("Copy failed: {e}")));
            }
        }
    }
}

fn chat_entries(controller: &InteractionController) -> Vec<ChatEntry<'_>> {
    controller
        .turns()
        .iter()
        .enumerate()
        .map(|(index, turn)| ChatEntry {
            role: turn.role(),
            text: controller.display_text(index).unwrap_or_else(|| turn.text()),
            revealing: controller.reveal().visible_chars(index).is_some(),
        })
        .collect()
}

fn status_view(
    controller: &InteractionController,
    state: &AppState,
    session_attempted: bool,
) -> StatusView {
    if session_attempted && !controller.is_ready() {
        StatusView::Offline
    } else if controller.is_busy() {
        StatusView::Waiting {
            elapsed: state.elapsed(),
        }
    } else if controller.reveal().is_revealing() {
        StatusView::Typing
    } else {
        StatusView::Idle
    }
}
