//! HTTP implementation of [`ChatApi`] on top of reqwest.

use reqwest::Response;
use serde::de::DeserializeOwned;

use super::{ApiError, ChatApi};
use crate::config::ClientConfig;
use crate::models::{
    ChatReply, ChatRequest, Conversation, ConversationId, ConversationSummary, ErrorBody,
    ModelInfo, ModelList,
};

/// Chat API client for the backend at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatApi {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn conversation_url(&self, id: &ConversationId) -> String {
        self.url(&format!(
            "/api/conversations/{}",
            urlencoding::encode(&id.to_string())
        ))
    }
}

/// Map a transport failure.
fn request_error(e: &reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Turn non-2xx responses into [`ApiError::Status`], picking up `{"error": ...}`.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error);

    tracing::debug!(status = status.as_u16(), ?error, "Chat API returned an error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        error,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await.map_err(|e| request_error(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ChatApi for HttpChatApi {
    async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| request_error(&e))?;
        check_status(response).await.map(|_| ())
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/conversations"))
            .send()
            .await
            .map_err(|e| request_error(&e))?;
        decode(response).await
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ApiError> {
        let response = self
            .http
            .get(self.conversation_url(id))
            .send()
            .await
            .map_err(|e| request_error(&e))?;
        decode(response).await
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.conversation_url(id))
            .send()
            .await
            .map_err(|e| request_error(&e))?;
        check_status(response).await?;

        tracing::debug!(%id, "Conversation deleted");
        Ok(())
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        tracing::debug!(
            conversation_id = ?request.conversation_id,
            len = request.message.len(),
            "Sending chat message"
        );
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let reply: ChatReply = decode(response).await?;
        tracing::debug!(
            conversation_id = %reply.conversation_id,
            model = reply.model.as_deref().unwrap_or("-"),
            "Chat reply received"
        );
        Ok(reply)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/models"))
            .send()
            .await
            .map_err(|e| request_error(&e))?;
        let list: ModelList = decode(response).await?;
        Ok(list.models)
    }
}
