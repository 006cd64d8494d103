//! Chat proxy boundary
//!
//! Fetches complete replies from the proxy endpoint. Replies (or the
//! fallback apology) are handed to the reveal controller unchanged.

mod client;
mod conversation;
mod types;

pub use client::{ChatClient, FALLBACK_REPLY, INITIATE_ROUTE};
pub use conversation::{Conversation, Message, Role};
pub use types::{ChatRequest, ChatResponse};
