//! Conversation session management.
//!
//! A `Session` owns the message log and folds streamed agent replies into
//! it. Every update is addressed by message id, so replies from several
//! submissions can interleave, and late events for messages that were
//! cleared away are dropped.

mod manager;
mod reply;
mod store;
mod types;


pub use manager::Session;
pub use types::{Applied, SessionUpdate, SubmitGate};
