pub mod chat;
pub mod input;

pub use chat::{ChatEntry, ChatWidget, SUGGESTIONS, ScrollState, suggestion_for_key};
pub use input::{InputAction, InputWidget};
