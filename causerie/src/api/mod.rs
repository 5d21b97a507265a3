//! Chat API access.
//!
//! `ChatApi` is the seam between the controller and the network:
//! - `HttpChatApi` talks to the real backend over HTTP/JSON
//! - `MockChatApi` (tests only) replays scripted results and records calls

pub mod client;
#[cfg(test)]
pub mod mock;

use thiserror::Error;

use crate::models::{ChatReply, ChatRequest, Conversation, ConversationId, ConversationSummary, ModelInfo};

pub use client::HttpChatApi;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never completed (refused, reset, timed out).
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {status}")]
    Status { status: u16, error: Option<String> },

    /// The body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Operations the client needs from the chat backend.
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /api/health`; any 2xx is healthy.
    async fn health(&self) -> Result<(), ApiError>;

    /// `GET /api/conversations`.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError>;

    /// `GET /api/conversations/{id}`.
    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ApiError>;

    /// `DELETE /api/conversations/{id}`.
    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError>;

    /// `POST /api/chat`.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// `GET /api/models`.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError>;
}
