//! Mock chat API that replays scripted results.
//!
//! Every call is recorded in a shared [`Journal`].

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{ApiError, ChatApi};
use crate::models::{
    ChatReply, ChatRequest, Conversation, ConversationId, ConversationSummary, ModelInfo,
};
use crate::testing::{Call, Entry, Journal};

pub struct MockChatApi {
    journal: Journal,
    health: Mutex<Result<(), ApiError>>,
    conversations: Mutex<Result<Vec<ConversationSummary>, ApiError>>,
    details: Mutex<HashMap<ConversationId, Conversation>>,
    detail_error: Mutex<Option<ApiError>>,
    delete_result: Mutex<Result<(), ApiError>>,
    chat_replies: Mutex<VecDeque<Result<ChatReply, ApiError>>>,
    models: Mutex<Result<Vec<ModelInfo>, ApiError>>,
}

impl MockChatApi {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            health: Mutex::new(Ok(())),
            conversations: Mutex::new(Ok(Vec::new())),
            details: Mutex::new(HashMap::new()),
            detail_error: Mutex::new(None),
            delete_result: Mutex::new(Ok(())),
            chat_replies: Mutex::new(VecDeque::new()),
            models: Mutex::new(Ok(Vec::new())),
        }
    }

    pub fn set_health(&self, result: Result<(), ApiError>) {
        *self.health.lock().unwrap() = result;
    }

    pub fn set_conversations(&self, result: Result<Vec<ConversationSummary>, ApiError>) {
        *self.conversations.lock().unwrap() = result;
    }

    pub fn add_conversation(&self, conversation: Conversation) {
        self.details
            .lock()
            .unwrap()
            .insert(conversation.id.clone(), conversation);
    }

    /// Force every conversation fetch to fail with `error`.
    pub fn fail_conversation_fetch(&self, error: ApiError) {
        *self.detail_error.lock().unwrap() = Some(error);
    }

    pub fn set_delete_result(&self, result: Result<(), ApiError>) {
        *self.delete_result.lock().unwrap() = result;
    }

    /// Queue the outcome of the next `send_chat`.
    pub fn push_chat_reply(&self, result: Result<ChatReply, ApiError>) {
        self.chat_replies.lock().unwrap().push_back(result);
    }

    pub fn set_models(&self, result: Result<Vec<ModelInfo>, ApiError>) {
        *self.models.lock().unwrap() = result;
    }

    fn record(&self, call: Call) {
        self.journal.push(Entry::Api(call));
    }
}

#[async_trait::async_trait]
impl ChatApi for MockChatApi {
    async fn health(&self) -> Result<(), ApiError> {
        self.record(Call::Health);
        self.health.lock().unwrap().clone()
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        self.record(Call::ListConversations);
        self.conversations.lock().unwrap().clone()
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ApiError> {
        self.record(Call::GetConversation(id.clone()));
        if let Some(error) = self.detail_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                error: Some("Conversation non trouvée".to_string()),
            })
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        self.record(Call::DeleteConversation(id.clone()));
        self.delete_result.lock().unwrap().clone()
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.record(Call::Chat(request.clone()));
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        self.record(Call::ListModels);
        self.models.lock().unwrap().clone()
    }
}
