//! CLI command execution.
//!
//! One-shot subcommands talk to the backend directly and fail with a
//! non-zero exit; the interactive session goes through the controller.

use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::api::{ApiError, ChatApi, HttpChatApi};
use crate::config::ClientConfig;
use crate::models::{ChatRequest, ConversationId};
use crate::ui::{
    chat_error_text, connection_error_text, format_entry, format_message, ChatView, Speaker,
    TerminalView, CONFIRM_DELETE, DELETE_FAILED, EMPTY_LIST,
};

use super::args::{Cli, Commands};
use super::repl;

impl From<&Cli> for ClientConfig {
    fn from(cli: &Cli) -> Self {
        Self::new(cli.api_url.clone()).with_timeout(cli.timeout.map(Duration::from_secs))
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    let config = ClientConfig::from(&cli);
    config.validate()?;
    let api = HttpChatApi::new(&config).context("Failed to build HTTP client")?;
    tracing::debug!(base_url = api.base_url(), timeout = ?config.timeout, "Using chat backend");

    match cli.command {
        None | Some(Commands::Chat) => {
            repl::run(api).await;
            Ok(())
        }
        Some(Commands::Health) => check_health(&api).await,
        Some(Commands::List) => list_conversations(&api).await,
        Some(Commands::Show { id }) => show_conversation(&api, &parse_id(&id)).await,
        Some(Commands::Delete { id, yes }) => delete_conversation(&api, &parse_id(&id), yes).await,
        Some(Commands::Send {
            conversation,
            message,
        }) => {
            let message = message.join(" ");
            if message.trim().is_empty() {
                bail!("Message is required for send command");
            }
            send_once(&api, &message, conversation.as_deref().map(parse_id)).await
        }
        Some(Commands::Models) => list_models(&api).await,
    }
}

fn parse_id(raw: &str) -> ConversationId {
    raw.parse().unwrap_or_else(|e| match e {})
}

/// Turn an API failure into a user-facing error.
fn describe(e: &ApiError) -> String {
    match e {
        ApiError::Status { status, error } => match error {
            Some(error) => format!("{error} (HTTP {status})"),
            None => format!("HTTP {status}"),
        },
        other => connection_error_text(&other.to_string()),
    }
}

async fn check_health(api: &HttpChatApi) -> Result<()> {
    match api.health().await {
        Ok(()) => {
            println!("Backend OK ({})", api.base_url());
            Ok(())
        }
        Err(e) => bail!("Backend unavailable at {}: {}", api.base_url(), describe(&e)),
    }
}

async fn list_conversations(api: &HttpChatApi) -> Result<()> {
    let conversations = api
        .list_conversations()
        .await
        .map_err(|e| anyhow::anyhow!(describe(&e)))
        .context("Failed to load conversations")?;

    if conversations.is_empty() {
        println!("{EMPTY_LIST}");
        return Ok(());
    }

    for (i, conversation) in conversations.iter().enumerate() {
        println!("{}  [{}]", format_entry(i + 1, conversation, false), conversation.id);
    }
    Ok(())
}

async fn show_conversation(api: &HttpChatApi, id: &ConversationId) -> Result<()> {
    let conversation = api
        .get_conversation(id)
        .await
        .map_err(|e| anyhow::anyhow!(describe(&e)))
        .with_context(|| format!("Failed to load conversation {id}"))?;

    if let Some(title) = conversation.title.as_deref() {
        println!("{title}");
        println!();
    }
    for message in &conversation.messages {
        let speaker = if message.role.is_user() {
            Speaker::User
        } else {
            Speaker::Assistant
        };
        println!("{}", format_message(speaker, &message.content));
    }
    Ok(())
}

async fn delete_conversation(api: &HttpChatApi, id: &ConversationId, yes: bool) -> Result<()> {
    if !yes && !TerminalView::stdio().confirm(CONFIRM_DELETE) {
        println!("Annulé.");
        return Ok(());
    }

    if let Err(e) = api.delete_conversation(id).await {
        bail!("{DELETE_FAILED}: {}", describe(&e));
    }
    println!("Conversation {id} supprimée.");
    Ok(())
}

async fn send_once(
    api: &HttpChatApi,
    message: &str,
    conversation_id: Option<ConversationId>,
) -> Result<()> {
    let request = ChatRequest {
        message: message.trim().to_string(),
        conversation_id,
    };

    match api.send_chat(&request).await {
        Ok(reply) => {
            println!("{}", format_message(Speaker::Assistant, &reply.response));
            eprintln!("Conversation: {}", reply.conversation_id);
            Ok(())
        }
        Err(ApiError::Status { error, .. }) => bail!(chat_error_text(error.as_deref())),
        Err(e) => bail!(connection_error_text(&e.to_string())),
    }
}

async fn list_models(api: &HttpChatApi) -> Result<()> {
    let models = api
        .list_models()
        .await
        .map_err(|e| anyhow::anyhow!(describe(&e)))
        .context("Impossible de récupérer les modèles")?;

    if models.is_empty() {
        println!("Aucun modèle");
    }
    for model in models {
        println!("{}", model.name);
    }
    Ok(())
}
