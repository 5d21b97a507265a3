//! Shared journal for controller tests.
//!
//! The mock API and the recording view append to the same journal, so tests
//! can assert the relative order of view updates and network calls.

use std::sync::{Arc, Mutex};

use crate::models::{ChatRequest, ConversationId};
use crate::ui::Speaker;

/// A network call seen by the mock API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    ListConversations,
    GetConversation(ConversationId),
    DeleteConversation(ConversationId),
    Chat(ChatRequest),
    ListModels,
}

/// A view update seen by the recording view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOp {
    ShowConversations { count: usize, active: Option<ConversationId> },
    ShowEmptyConversations,
    ClearActiveConversation,
    ClearMessages,
    ShowWelcome,
    AppendMessage(Speaker, String),
    ShowLoading,
    RemoveLoading,
    SendEnabled(bool),
    DeleteVisible(bool),
    ClearInput,
    FocusInput,
    Confirm(String),
    Alert(String),
    ShowModels(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Api(Call),
    View(ViewOp),
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: Entry) {
        self.entries
            .lock()
            .expect("journal lock poisoned, a prior test panicked")
            .push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .expect("journal lock poisoned, a prior test panicked")
            .clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Api(call) => Some(call),
                Entry::View(_) => None,
            })
            .collect()
    }

    /// Position of the first entry matching `pred`.
    pub fn position(&self, pred: impl Fn(&Entry) -> bool) -> Option<usize> {
        self.entries().iter().position(pred)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("journal lock poisoned, a prior test panicked")
            .clear();
    }
}
