//! Wire models for the chat API.

mod chat;
mod conversation;
mod message;

pub use chat::{ChatReply, ChatRequest, ErrorBody, ModelInfo, ModelList};
pub use conversation::{Conversation, ConversationId, ConversationSummary};
pub use message::{Message, MessageRole};
