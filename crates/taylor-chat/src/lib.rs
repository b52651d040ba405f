//! taylor-chat: streaming chat client core for the Taylor assistant
//!
//! This crate sends a conversation transcript to a remote chat endpoint
//! and assembles the streamed reply incrementally. A turn is
//! all-or-nothing: it either completes with the reply in the transcript
//! or is rolled back as if it never produced one.

pub mod assembler;
pub mod client;
pub mod conversation;
pub mod error;
pub mod sse;
pub mod types;

pub use assembler::ReplyAssembler;
pub use client::{ChatClient, ReplySink};
pub use conversation::Conversation;
pub use error::{Error, Result};
pub use types::{Message, Role};
