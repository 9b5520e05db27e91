pub mod controller;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod reveal;
pub mod types;

pub use controller::{
    CompletedReply, InteractionController, PendingReply, RequestToken, SubmitOutcome,
    SubmitRejection,
};
pub use conversation::Conversation;
pub use error::{ChatError, Result};
pub use gateway::{ChatSession, SessionGateway, SessionHandle};
pub use reveal::{RevealScheduler, RevealTick, RevealTickSink, TickOutcome};
pub use types::{Role, SessionId, Turn};
