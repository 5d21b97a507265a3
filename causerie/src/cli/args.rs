//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand};

use crate::config::DEFAULT_API_URL;

/// Causerie - chat with a conversation-based chat backend from the terminal
#[derive(Parser, Debug)]
#[command(name = "causerie")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the chat backend
    #[arg(long, env = "CAUSERIE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, env = "CAUSERIE_TIMEOUT", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (interactive chat when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// Check that the backend is reachable
    Health,

    /// List conversations, most recently updated first
    List,

    /// Print every message of a conversation
    Show {
        /// Conversation ID
        id: String,
    },

    /// Delete a conversation
    Delete {
        /// Conversation ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Send one message and print the reply
    Send {
        /// Continue this conversation instead of starting a new one
        #[arg(short, long)]
        conversation: Option<String>,

        /// Message to send
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },

    /// List the models installed on the backend
    Models,
}
