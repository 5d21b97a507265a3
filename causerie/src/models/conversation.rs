//! Conversation models.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format for conversation timestamps (fr-FR date, 24h time).
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Opaque conversation identifier.
///
/// The server hands out integers, but the client never does arithmetic on
/// them: whatever JSON shape arrives is sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversationId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl std::str::FromStr for ConversationId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes an integer id, anything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Int))
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Entry of the conversation list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ConversationSummary {
    /// Title to show in the list; untitled conversations fall back to their id.
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => format!("#{}", self.id),
        }
    }

    /// Last update time formatted for display, empty when unknown.
    pub fn display_date(&self) -> String {
        self.updated_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default()
    }
}

/// A conversation with its full message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Messages in presentation order.
    #[serde(default)]
    pub messages: Vec<super::Message>,
}

/// Format a server timestamp as `dd/mm/yyyy HH:MM`.
///
/// Timestamps with an offset are shown in local time. Naive timestamps (what
/// the server actually emits) are shown as-is. Anything unparseable is
/// returned unchanged.
fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}
