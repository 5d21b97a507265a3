//! Chat controller: session state plus the user actions.
//!
//! One controller owns the active conversation id, the API handle and the
//! view. Every action handles its own failures; nothing is returned to the
//! caller except an outcome summary.

use crate::api::{ApiError, ChatApi};
use crate::models::{ChatRequest, ConversationId, ConversationSummary};
use crate::ui::{
    chat_error_text, connection_error_text, ChatView, Speaker, CONFIRM_DELETE, DELETE_FAILED,
};

const MODELS_FAILED: &str = "Impossible de récupérer les modèles";

/// How a send settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send after trimming.
    Skipped,
    /// The assistant replied.
    Replied,
    /// The server answered with an error status.
    Rejected,
    /// The request never completed or the reply was unreadable.
    Failed,
}

/// Send control held disabled for the lifetime of the guard.
///
/// Dropping it re-enables sending and gives focus back to the input,
/// whichever way the send ended.
struct SendControl<'a, V: ChatView> {
    view: &'a V,
}

impl<'a, V: ChatView> SendControl<'a, V> {
    fn acquire(view: &'a V) -> Self {
        view.set_send_enabled(false);
        Self { view }
    }
}

impl<V: ChatView> Drop for SendControl<'_, V> {
    fn drop(&mut self) {
        self.view.set_send_enabled(true);
        self.view.focus_input();
    }
}

pub struct ChatController<A, V> {
    api: A,
    view: V,
    current_conversation_id: Option<ConversationId>,
    /// Last list shown, so entries can be picked by position.
    listed: Vec<ConversationSummary>,
}

impl<A: ChatApi, V: ChatView> ChatController<A, V> {
    pub const fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            current_conversation_id: None,
            listed: Vec::new(),
        }
    }

    pub const fn current_conversation_id(&self) -> Option<&ConversationId> {
        self.current_conversation_id.as_ref()
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Id of the entry at 1-based `position` in the last list shown.
    pub fn listed_conversation(&self, position: usize) -> Option<&ConversationId> {
        position
            .checked_sub(1)
            .and_then(|i| self.listed.get(i))
            .map(|c| &c.id)
    }

    /// Check the backend and show the conversation list if it is up.
    ///
    /// Returns whether the backend answered the health check.
    pub async fn init(&mut self) -> bool {
        match self.api.health().await {
            Ok(()) => {
                self.refresh_list().await;
                true
            }
            Err(ApiError::Status { status, .. }) => {
                tracing::warn!(status, "Backend unavailable");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not reach the backend");
                false
            }
        }
    }

    /// Fetch all conversations and redraw the list.
    ///
    /// On failure the list keeps whatever it showed before.
    pub async fn refresh_list(&mut self) {
        match self.api.list_conversations().await {
            Ok(conversations) if conversations.is_empty() => {
                self.listed.clear();
                self.view.show_empty_conversations();
            }
            Ok(conversations) => {
                self.view
                    .show_conversations(&conversations, self.current_conversation_id.as_ref());
                self.listed = conversations;
            }
            Err(e) => tracing::error!(error = %e, "Failed to load conversations"),
        }
    }

    /// Make `id` the active conversation and show its full history.
    ///
    /// On failure nothing is active any more: the pane is empty and the next
    /// message starts a new conversation.
    pub async fn load_conversation(&mut self, id: ConversationId) {
        match self.api.get_conversation(&id).await {
            Ok(conversation) => {
                self.current_conversation_id = Some(id);
                self.view.clear_messages();
                for message in &conversation.messages {
                    let speaker = if message.role.is_user() {
                        Speaker::User
                    } else {
                        Speaker::Assistant
                    };
                    self.view.append_message(speaker, &message.content);
                }

                self.refresh_list().await;
                self.view.set_delete_visible(true);
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "Failed to load conversation");
                self.current_conversation_id = None;
                self.view.clear_messages();
                self.view.set_delete_visible(false);
                self.view.clear_active_conversation();
            }
        }
    }

    /// Load the entry at 1-based `position` of the last list shown.
    ///
    /// Returns `false` if there is no such entry.
    pub async fn open_listed(&mut self, position: usize) -> bool {
        let Some(id) = self.listed_conversation(position).cloned() else {
            return false;
        };
        self.load_conversation(id).await;
        true
    }

    /// Back to an empty, unsaved conversation. Client-side only.
    pub fn start_new_conversation(&mut self) {
        self.current_conversation_id = None;
        self.view.show_welcome();
        self.view.set_delete_visible(false);
        self.view.clear_active_conversation();
        self.view.focus_input();
    }

    /// Delete the active conversation after confirmation.
    ///
    /// Returns whether a conversation was deleted.
    pub async fn delete_current_conversation(&mut self) -> bool {
        let Some(id) = self.current_conversation_id.clone() else {
            return false;
        };
        if !self.view.confirm(CONFIRM_DELETE) {
            return false;
        }

        match self.api.delete_conversation(&id).await {
            Ok(()) => {
                tracing::info!(%id, "Conversation deleted");
                self.start_new_conversation();
                self.refresh_list().await;
                true
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "Failed to delete conversation");
                self.view.alert(DELETE_FAILED);
                false
            }
        }
    }

    /// Send `input` to the active conversation (or a new one).
    pub async fn send_message(&mut self, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Skipped;
        }

        let outcome = {
            let _send = SendControl::acquire(&self.view);

            self.view.append_message(Speaker::User, message);
            self.view.clear_input();
            self.view.show_loading();

            let request = ChatRequest {
                message: message.to_string(),
                conversation_id: self.current_conversation_id.clone(),
            };
            let result = self.api.send_chat(&request).await;
            self.view.remove_loading();

            match result {
                Ok(reply) => {
                    self.view.append_message(Speaker::Assistant, &reply.response);
                    if self.current_conversation_id.is_none() {
                        self.current_conversation_id = Some(reply.conversation_id);
                        self.view.set_delete_visible(true);
                    }
                    SendOutcome::Replied
                }
                Err(ApiError::Status { status, error }) => {
                    tracing::warn!(status, ?error, "Chat request rejected");
                    self.view
                        .append_message(Speaker::Assistant, &chat_error_text(error.as_deref()));
                    SendOutcome::Rejected
                }
                Err(e) => {
                    tracing::error!(error = %e, "Chat request failed");
                    self.view
                        .append_message(Speaker::Assistant, &connection_error_text(&e.to_string()));
                    SendOutcome::Failed
                }
            }
        };

        if outcome == SendOutcome::Replied {
            self.refresh_list().await;
        }
        outcome
    }

    /// Show the models installed on the backend.
    pub async fn show_models(&self) {
        match self.api.list_models().await {
            Ok(models) => self.view.show_models(&models),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list models");
                self.view.alert(MODELS_FAILED);
            }
        }
    }
}
