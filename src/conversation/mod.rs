//! In-memory conversation transcripts.
//!
//! A [`ConversationStore`] owns one transcript and is its only writer. It
//! supports two mutations: appending a new message, and editing an existing
//! message, which discards every message after it.

mod ids;
mod message;
mod store;

pub use ids::{IdSource, SequentialIds, UuidV7Ids};
pub use message::{Message, MessageId};
pub use store::{ConversationStore, Outcome, Rejection, TruncatePolicy};
