//! Line-oriented terminal rendering of the chat.

use std::cell::{Cell, RefCell};
use std::io::{BufRead, IsTerminal, Stdout, StdinLock, Write};

use colored::Colorize;

use super::{ChatView, Speaker, EMPTY_LIST, WELCOME_BODY, WELCOME_TITLE};
use crate::models::{ConversationId, ConversationSummary, ModelInfo};

const PROMPT: &str = "› ";
const LOADING: &str = "…";

/// Clears the current line and returns the cursor to column 0.
const ERASE_LINE: &str = "\r\x1b[2K";

/// Format one message entry.
pub fn format_message(speaker: Speaker, text: &str) -> String {
    let label = format!("{} :", speaker.label());
    match speaker {
        Speaker::User => format!("{} {text}", label.cyan().bold()),
        Speaker::Assistant => format!("{} {text}", label.green().bold()),
    }
}

/// Format one conversation list entry. `position` is 1-based.
pub fn format_entry(position: usize, conversation: &ConversationSummary, active: bool) -> String {
    let marker = if active { "▶" } else { " " };
    let title = conversation.display_title();
    let title = if active { title.bold().to_string() } else { title };
    let date = conversation.display_date();
    format!("{marker} {position:>2}. {title}  {}", date.dimmed())
}

/// Chat view writing to `out` and reading user input from `input`.
pub struct TerminalView<R, W> {
    input: RefCell<R>,
    out: RefCell<W>,
    interactive: bool,
    loading: Cell<bool>,
    send_enabled: Cell<bool>,
    delete_visible: Cell<bool>,
    /// Lines of the last conversation list printed; identical lists are skipped.
    last_listing: RefCell<Option<Vec<String>>>,
}

impl TerminalView<StdinLock<'static>, Stdout> {
    /// View bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        let interactive = std::io::stdout().is_terminal();
        Self::new(std::io::stdin().lock(), std::io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    /// `interactive` enables cursor tricks (transient loading line, prompt).
    pub fn new(input: R, out: W, interactive: bool) -> Self {
        Self {
            input: RefCell::new(input),
            out: RefCell::new(out),
            interactive,
            loading: Cell::new(false),
            send_enabled: Cell::new(true),
            delete_visible: Cell::new(false),
            last_listing: RefCell::new(None),
        }
    }

    pub fn is_delete_visible(&self) -> bool {
        self.delete_visible.get()
    }

    fn print_listing(&self, lines: Vec<String>) {
        if self.last_listing.borrow().as_ref() == Some(&lines) {
            return;
        }
        self.settle_loading();
        for line in &lines {
            self.println(line);
        }
        self.last_listing.replace(Some(lines));
    }

    /// Make the next conversation list print even if it did not change.
    pub fn invalidate_listing(&self) {
        self.last_listing.replace(None);
    }

    /// Read one raw line. Bytes that are not UTF-8 are replaced, not fatal.
    ///
    /// Returns `None` at end of input or when the input is unreadable.
    fn read_line(&self) -> Option<String> {
        let mut buf = Vec::new();
        match self.input.borrow_mut().read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8(buf).unwrap_or_else(|e| {
                tracing::warn!("Input is not valid UTF-8, invalid bytes replaced");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            })),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                None
            }
        }
    }

    /// Read the next user input. A trailing `\` continues onto the next line.
    ///
    /// Returns `None` at end of input.
    pub fn read_input(&self) -> Option<String> {
        let mut message = String::new();
        loop {
            if self.interactive && self.send_enabled.get() {
                let prompt = if message.is_empty() { PROMPT } else { "  " };
                self.write(&prompt.bold().to_string(), false);
            }

            let Some(line) = self.read_line() else {
                return (!message.is_empty()).then_some(message);
            };

            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(continued) = line.strip_suffix('\\') {
                message.push_str(continued);
                message.push('\n');
            } else {
                message.push_str(line);
                return Some(message);
            }
        }
    }

    /// Print a plain line.
    pub fn println(&self, text: &str) {
        self.write(text, true);
    }

    fn write(&self, text: &str, newline: bool) {
        let mut out = self.out.borrow_mut();
        // A closed stdout leaves nothing useful to report to.
        let _ = if newline {
            writeln!(out, "{text}")
        } else {
            write!(out, "{text}")
        };
        let _ = out.flush();
    }

    /// Drop the loading line before printing anything else.
    fn settle_loading(&self) {
        if self.loading.replace(false) && self.interactive {
            self.write(ERASE_LINE, false);
        }
    }
}

impl<R: BufRead, W: Write> ChatView for TerminalView<R, W> {
    fn show_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>) {
        let mut lines = vec!["Conversations".underline().to_string()];
        lines.extend(conversations.iter().enumerate().map(|(i, conversation)| {
            format_entry(i + 1, conversation, active == Some(&conversation.id))
        }));
        self.print_listing(lines);
    }

    fn show_empty_conversations(&self) {
        self.print_listing(vec![EMPTY_LIST.dimmed().to_string()]);
    }

    fn clear_active_conversation(&self) {
        // Printed entries cannot be restyled; the next listing has no highlight.
    }

    fn clear_messages(&self) {
        self.settle_loading();
        self.println(&"─".repeat(40).dimmed().to_string());
    }

    fn show_welcome(&self) {
        self.clear_messages();
        self.println(&WELCOME_TITLE.bold().to_string());
        self.println(WELCOME_BODY);
    }

    fn append_message(&self, speaker: Speaker, text: &str) {
        self.settle_loading();
        self.println(&format_message(speaker, text));
    }

    fn show_loading(&self) {
        self.loading.set(true);
        if self.interactive {
            let label = format!("{} :", Speaker::Assistant.label());
            self.write(&format!("{} {LOADING}", label.green().bold()), false);
        }
    }

    fn remove_loading(&self) {
        self.settle_loading();
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send_enabled.set(enabled);
    }

    fn set_delete_visible(&self, visible: bool) {
        self.delete_visible.set(visible);
    }

    fn clear_input(&self) {
        // The line was consumed by `read_input`.
    }

    fn focus_input(&self) {}

    fn confirm(&self, question: &str) -> bool {
        self.settle_loading();
        self.write(&format!("{question} [o/N] "), false);

        self.read_line().is_some_and(|answer| {
            matches!(answer.trim().to_lowercase().as_str(), "o" | "oui" | "y" | "yes")
        })
    }

    fn alert(&self, message: &str) {
        self.settle_loading();
        self.println(&format!("⚠ {message}").red().bold().to_string());
    }

    fn show_models(&self, models: &[ModelInfo]) {
        self.settle_loading();
        if models.is_empty() {
            self.println(&"Aucun modèle".dimmed().to_string());
            return;
        }
        for model in models {
            self.println(&format!("  {}", model.name));
        }
    }
}
