//! Interactive chat loop.

use std::io::{BufRead, Write};

use crate::api::ChatApi;
use crate::controller::ChatController;
use crate::models::ConversationId;
use crate::ui::{ChatView, TerminalView};

const HELP_DELETE: &str = "  /delete       Supprimer la conversation actuelle";

const HELP: &[&str] = &[
    "Commandes :",
    "  /new          Nouvelle conversation",
    "  /list         Afficher les conversations",
    "  /open <N>     Ouvrir la conversation N de la liste",
    "  /load <ID>    Ouvrir une conversation par identifiant",
    HELP_DELETE,
    "  /models       Modèles disponibles",
    "  /help         Cette aide",
    "  /quit         Quitter",
    "Terminez une ligne par \\ pour continuer sur la suivante.",
];

/// Help text; `/delete` is only offered while a conversation is active.
fn help_text(delete_available: bool) -> String {
    HELP.iter()
        .filter(|line| delete_available || **line != HELP_DELETE)
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Text to send to the assistant.
    Message(&'a str),
    Command(ReplCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    New,
    List,
    Open(usize),
    Load(ConversationId),
    Delete,
    Models,
    Help,
    Quit,
    /// Unknown command or bad arguments; carries the text to show.
    Invalid(String),
}

/// Split user input into a message or a slash command.
///
/// A leading `//` escapes the slash and sends the rest as a message.
pub fn parse_input(input: &str) -> Input<'_> {
    let trimmed = input.trim_start();
    if let Some(escaped) = trimmed.strip_prefix("//") {
        return Input::Message(escaped);
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Message(input);
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match (name, arg) {
        ("new", _) => ReplCommand::New,
        ("list" | "ls", _) => ReplCommand::List,
        ("open", Some(n)) => n.parse().map_or_else(
            |_| ReplCommand::Invalid(format!("Position invalide : {n}")),
            ReplCommand::Open,
        ),
        ("open", None) => ReplCommand::Invalid("Usage : /open <N>".to_string()),
        ("load", Some(id)) => ReplCommand::Load(id.parse().unwrap_or_else(|e| match e {})),
        ("load", None) => ReplCommand::Invalid("Usage : /load <ID>".to_string()),
        ("delete" | "rm", _) => ReplCommand::Delete,
        ("models", _) => ReplCommand::Models,
        ("help" | "?", _) => ReplCommand::Help,
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        (other, _) => ReplCommand::Invalid(format!("Commande inconnue : /{other} (voir /help)")),
    };
    Input::Command(command)
}

/// Run the interactive session on stdin/stdout.
pub async fn run<A: ChatApi>(api: A) {
    run_with(api, TerminalView::stdio()).await;
}

/// Run the interactive session until `/quit` or end of input.
pub async fn run_with<A: ChatApi, R: BufRead, W: Write>(api: A, view: TerminalView<R, W>) {
    view.show_welcome();
    view.println("Tapez /help pour la liste des commandes.");

    let mut controller = ChatController::new(api, view);
    controller.init().await;

    while let Some(input) = controller.view().read_input() {
        match parse_input(&input) {
            Input::Message(text) => {
                controller.send_message(text).await;
            }
            Input::Command(command) => match command {
                ReplCommand::New => controller.start_new_conversation(),
                ReplCommand::List => {
                    controller.view().invalidate_listing();
                    controller.refresh_list().await;
                }
                ReplCommand::Open(position) => {
                    if !controller.open_listed(position).await {
                        controller
                            .view()
                            .println("Aucune conversation à cette position (voir /list).");
                    }
                }
                ReplCommand::Load(id) => controller.load_conversation(id).await,
                ReplCommand::Delete => {
                    controller.delete_current_conversation().await;
                }
                ReplCommand::Models => controller.show_models().await,
                ReplCommand::Help => {
                    let view = controller.view();
                    view.println(&help_text(view.is_delete_visible()));
                }
                ReplCommand::Quit => break,
                ReplCommand::Invalid(message) => controller.view().println(&message),
            },
        }
    }
}
