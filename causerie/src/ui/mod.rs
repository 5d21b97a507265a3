//! Presentation layer.
//!
//! The controller never prints. It drives a [`ChatView`], which owns the
//! message pane, the conversation list, the send control and the delete
//! action. Methods take `&self` so a send can keep the view borrowed across
//! the network call; implementations use interior mutability.

mod terminal;
#[cfg(test)]
pub mod recording;

pub use terminal::{format_entry, format_message, TerminalView};

use crate::models::{ConversationId, ConversationSummary, ModelInfo};

pub const EMPTY_LIST: &str = "Aucune conversation";
pub const WELCOME_TITLE: &str = "👋 Nouvelle conversation";
pub const WELCOME_BODY: &str = "Posez votre première question pour commencer !";
pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer cette conversation ?";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression de la conversation";
pub const GENERIC_ERROR: &str = "Une erreur est survenue";

/// Author styling of a message entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label shown in front of the message.
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Vous",
            Self::Assistant => "Assistant",
        }
    }
}

/// Inline error shown when the server rejected a message.
pub fn chat_error_text(server_error: Option<&str>) -> String {
    format!("❌ Erreur: {}", server_error.unwrap_or(GENERIC_ERROR))
}

/// Inline error shown when the backend could not be reached.
pub fn connection_error_text(cause: &str) -> String {
    format!("❌ Erreur de connexion: {cause}. Assurez-vous que le backend est démarré.")
}

/// Everything the controller needs to show.
pub trait ChatView {
    /// Replace the conversation list, highlighting `active` if present.
    fn show_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>);

    /// Replace the conversation list with the empty placeholder.
    fn show_empty_conversations(&self);

    /// Remove the highlight from every list entry.
    fn clear_active_conversation(&self);

    fn clear_messages(&self);

    /// Replace the message pane with the welcome placeholder.
    fn show_welcome(&self);

    /// Append a message entry. Removes the welcome placeholder if shown.
    fn append_message(&self, speaker: Speaker, text: &str);

    fn show_loading(&self);

    /// Remove the loading placeholder if present.
    fn remove_loading(&self);

    fn set_send_enabled(&self, enabled: bool);

    fn set_delete_visible(&self, visible: bool);

    fn clear_input(&self);

    fn focus_input(&self);

    /// Blocking yes/no question.
    fn confirm(&self, question: &str) -> bool;

    /// Blocking notice.
    fn alert(&self, message: &str);

    fn show_models(&self, models: &[ModelInfo]);
}
