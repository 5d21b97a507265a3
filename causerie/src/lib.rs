//! Causerie - a terminal client for a conversation-based chat backend.
//!
//! Architecture:
//! - `ChatApi` abstracts the backend's REST endpoints (`/api/chat`,
//!   `/api/conversations`, `/api/health`, `/api/models`)
//! - `ChatView` abstracts the screen; `TerminalView` draws it on a terminal
//! - `ChatController` holds the active conversation and maps each user
//!   action to one API call and a view update

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod models;
pub mod ui;

#[cfg(test)]
mod testing;
