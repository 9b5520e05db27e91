//! Owns the conversation, the session handle and the reveal cursor. Every
//! mutation goes through a method on [`InteractionController`].
//!
//! Submitting is split in three so the network call can run on another task
//! while the controller stays with the UI loop:
//!
//! 1. [`InteractionController::begin_submit`] validates, appends the user turn
//!    and takes the single in-flight slot.
//! 2. [`PendingReply::run`] awaits the remote reply.
//! 3. [`InteractionController::finish_submit`] applies the reply, but only if
//!    it carries the token that currently holds the slot.
//!
//! [`InteractionController::submit`] runs all three in place.

use std::sync::Arc;

use super::conversation::Conversation;
use super::error::{ChatError, Result};
use super::gateway::{SessionGateway, SessionHandle};
use super::reveal::{Reveal, RevealScheduler, RevealTick, TickOutcome};
use super::types::Turn;
use crate::providers::error::ProviderError;

pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize chat. Please restart the session.";
pub const SEND_FAILURE_MESSAGE: &str = "Error: Could not get a response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// No session handle: not initialized yet, or initialization failed.
    NotReady,
    EmptyMessage,
    /// Another request holds the in-flight slot.
    Busy,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Rejected(SubmitRejection),
    Replied { index: usize },
    /// The reply was dropped without appending a turn.
    Dropped(ChatError),
    Failed { index: usize, error: ChatError },
    /// The completion did not belong to the request holding the slot.
    Stale,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// A request that has left the controller and is waiting on the network.
pub struct PendingReply {
    token: RequestToken,
    session: SessionHandle,
    message: String,
}

impl PendingReply {
    pub async fn run(self) -> CompletedReply {
        let result = self.session.send(&self.message).await;
        CompletedReply {
            token: self.token,
            result,
        }
    }
}

impl std::fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReply")
            .field("token", &self.token)
            .field("session", &self.session.id())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct CompletedReply {
    token: RequestToken,
    result: std::result::Result<String, ProviderError>,
}

pub struct InteractionController {
    gateway: Arc<dyn SessionGateway>,
    session: Option<SessionHandle>,
    conversation: Conversation,
    reveal: Reveal,
    scheduler: RevealScheduler,
    in_flight: Option<RequestToken>,
    next_token: u64,
}

impl InteractionController {
    #[must_use]
    pub fn new(gateway: Arc<dyn SessionGateway>, scheduler: RevealScheduler) -> Self {
        Self {
            gateway,
            session: None,
            conversation: Conversation::new(),
            reveal: Reveal::new(),
            scheduler,
            in_flight: None,
            next_token: 0,
        }
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.initialize_with_history(&[]).await
    }

    /// Opens the remote session once. On failure an error turn is appended and
    /// the controller stays unready for the rest of the process.
    pub async fn initialize_with_history(&mut self, prior: &[Turn]) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        match self.gateway.open_session(prior).await {
            Ok(session) => {
                tracing::info!(
                    session = %session.id(),
                    provider = self.gateway.name(),
                    model = self.gateway.model(),
                    seeded_turns = prior.len(),
                    "Chat session initialized"
                );
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize chat session");
                self.conversation.push(Turn::error(INIT_FAILURE_MESSAGE));
                Err(ChatError::Init(e))
            }
        }
    }

    pub fn begin_submit(
        &mut self,
        message: &str,
    ) -> std::result::Result<PendingReply, SubmitRejection> {
        let Some(session) = self.session.clone() else {
            return Err(SubmitRejection::NotReady);
        };
        if message.trim().is_empty() {
            return Err(SubmitRejection::EmptyMessage);
        }
        if self.in_flight.is_some() {
            tracing::debug!("Submit rejected: a request is already in flight");
            return Err(SubmitRejection::Busy);
        }

        self.finish_reveal();
        self.conversation.push(Turn::user(message));

        self.next_token = self.next_token.wrapping_add(1);
        let token = RequestToken(self.next_token);
        self.in_flight = Some(token);

        tracing::debug!(session = %session.id(), chars = message.len(), "Sending message");

        Ok(PendingReply {
            token,
            session,
            message: message.to_string(),
        })
    }

    pub fn finish_submit(&mut self, completed: CompletedReply) -> SubmitOutcome {
        if self.in_flight != Some(completed.token) {
            tracing::warn!(token = ?completed.token, "Ignoring reply for a request that is not in flight");
            return SubmitOutcome::Stale;
        }
        self.in_flight = None;

        match completed.result {
            Ok(text) if text.is_empty() => {
                tracing::warn!("Model returned an empty reply; nothing appended");
                SubmitOutcome::Dropped(ChatError::EmptyReply)
            }
            Ok(text) => {
                let len = text.chars().count();
                let index = self.conversation.push(Turn::assistant(text));
                let tick = self.reveal.arm(index, len);
                self.scheduler.schedule(tick);
                SubmitOutcome::Replied { index }
            }
            Err(e) => {
                let error_text = e.block_reason().map_or_else(
                    || SEND_FAILURE_MESSAGE.to_string(),
                    |reason| format!("Message blocked: {reason}"),
                );
                tracing::error!(error = %e, blocked = e.is_blocked(), "Failed to get a response");
                let index = self.conversation.push(Turn::error(error_text));
                SubmitOutcome::Failed {
                    index,
                    error: ChatError::Send(e),
                }
            }
        }
    }

    pub async fn submit(&mut self, message: &str) -> SubmitOutcome {
        match self.begin_submit(message) {
            Ok(pending) => {
                let completed = pending.run().await;
                self.finish_submit(completed)
            }
            Err(rejection) => SubmitOutcome::Rejected(rejection),
        }
    }

    /// Applies a delivered tick and schedules the next one while text remains.
    pub fn on_reveal_tick(&mut self, tick: RevealTick) -> TickOutcome {
        let outcome = self.reveal.tick(tick);
        if outcome == TickOutcome::Advanced {
            self.scheduler.schedule(tick);
        }
        outcome
    }

    /// Stops the animation and any pending timer.
    pub fn teardown(&mut self) {
        self.finish_reveal();
        if let Some(session) = &self.session {
            tracing::info!(session = %session.id(), turns = self.conversation.len(), "Chat session closed");
        }
    }

    fn finish_reveal(&mut self) {
        self.scheduler.cancel();
        self.reveal.cancel();
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Text to render for `index`: a prefix while that turn is being revealed,
    /// the full text otherwise.
    #[must_use]
    pub fn display_text(&self, index: usize) -> Option<&str> {
        let turn = self.conversation.get(index)?;
        Some(
            self.reveal
                .visible_chars(index)
                .map_or_else(|| turn.text(), |chars| turn.prefix(chars)),
        )
    }

    #[must_use]
    pub const fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn show_pending_placeholder(&self) -> bool {
        self.is_busy()
    }

    #[must_use]
    pub fn latest_assistant_text(&self) -> Option<&str> {
        self.conversation
            .latest_assistant_index()
            .and_then(|index| self.conversation.get(index))
            .map(Turn::text)
    }

    #[must_use]
    pub fn gateway(&self) -> &dyn SessionGateway {
        self.gateway.as_ref()
    }
}
