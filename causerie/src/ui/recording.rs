//! View double for controller tests.
//!
//! Records every update in the shared [`Journal`] and keeps a model of what
//! would be on screen.

use std::cell::{Cell, RefCell};

use super::{ChatView, Speaker};
use crate::models::{ConversationId, ConversationSummary, ModelInfo};
use crate::testing::{Entry, Journal, ViewOp};

/// What the message pane currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    Welcome,
    Entries(Vec<(Speaker, String)>),
}

/// What the list pane currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPane {
    Untouched,
    Empty,
    Entries {
        ids: Vec<ConversationId>,
        active: Option<ConversationId>,
    },
}

pub struct RecordingView {
    journal: Journal,
    confirm_answer: Cell<bool>,
    pane: RefCell<Pane>,
    list: RefCell<ListPane>,
    loading: Cell<bool>,
    send_enabled: Cell<bool>,
    delete_visible: Cell<bool>,
    input_cleared: Cell<bool>,
}

impl RecordingView {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            confirm_answer: Cell::new(true),
            pane: RefCell::new(Pane::Welcome),
            list: RefCell::new(ListPane::Untouched),
            loading: Cell::new(false),
            send_enabled: Cell::new(true),
            delete_visible: Cell::new(false),
            input_cleared: Cell::new(false),
        }
    }

    /// Answer given to the next confirmation prompts.
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn pane(&self) -> Pane {
        self.pane.borrow().clone()
    }

    /// Entries of the message pane; empty when the welcome text is shown.
    pub fn messages(&self) -> Vec<(Speaker, String)> {
        match &*self.pane.borrow() {
            Pane::Welcome => Vec::new(),
            Pane::Entries(entries) => entries.clone(),
        }
    }

    pub fn list(&self) -> ListPane {
        self.list.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_send_enabled(&self) -> bool {
        self.send_enabled.get()
    }

    pub fn is_delete_visible(&self) -> bool {
        self.delete_visible.get()
    }

    pub fn was_input_cleared(&self) -> bool {
        self.input_cleared.get()
    }

    fn record(&self, op: ViewOp) {
        self.journal.push(Entry::View(op));
    }
}

impl ChatView for RecordingView {
    fn show_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>) {
        self.record(ViewOp::ShowConversations {
            count: conversations.len(),
            active: active.cloned(),
        });
        let ids: Vec<_> = conversations.iter().map(|c| c.id.clone()).collect();
        let active = active.filter(|id| ids.contains(id)).cloned();
        *self.list.borrow_mut() = ListPane::Entries { ids, active };
    }

    fn show_empty_conversations(&self) {
        self.record(ViewOp::ShowEmptyConversations);
        *self.list.borrow_mut() = ListPane::Empty;
    }

    fn clear_active_conversation(&self) {
        self.record(ViewOp::ClearActiveConversation);
        if let ListPane::Entries { active, .. } = &mut *self.list.borrow_mut() {
            *active = None;
        }
    }

    fn clear_messages(&self) {
        self.record(ViewOp::ClearMessages);
        *self.pane.borrow_mut() = Pane::Entries(Vec::new());
        self.loading.set(false);
    }

    fn show_welcome(&self) {
        self.record(ViewOp::ShowWelcome);
        *self.pane.borrow_mut() = Pane::Welcome;
        self.loading.set(false);
    }

    fn append_message(&self, speaker: Speaker, text: &str) {
        self.record(ViewOp::AppendMessage(speaker, text.to_string()));
        let mut pane = self.pane.borrow_mut();
        if let Pane::Entries(entries) = &mut *pane {
            entries.push((speaker, text.to_string()));
        } else {
            *pane = Pane::Entries(vec![(speaker, text.to_string())]);
        }
    }

    fn show_loading(&self) {
        self.record(ViewOp::ShowLoading);
        self.loading.set(true);
    }

    fn remove_loading(&self) {
        self.record(ViewOp::RemoveLoading);
        self.loading.set(false);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.record(ViewOp::SendEnabled(enabled));
        self.send_enabled.set(enabled);
    }

    fn set_delete_visible(&self, visible: bool) {
        self.record(ViewOp::DeleteVisible(visible));
        self.delete_visible.set(visible);
    }

    fn clear_input(&self) {
        self.record(ViewOp::ClearInput);
        self.input_cleared.set(true);
    }

    fn focus_input(&self) {
        self.record(ViewOp::FocusInput);
    }

    fn confirm(&self, question: &str) -> bool {
        self.record(ViewOp::Confirm(question.to_string()));
        self.confirm_answer.get()
    }

    fn alert(&self, message: &str) {
        self.record(ViewOp::Alert(message.to_string()));
    }

    fn show_models(&self, models: &[ModelInfo]) {
        self.record(ViewOp::ShowModels(models.len()));
    }
}
