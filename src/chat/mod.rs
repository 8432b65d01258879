//! Interactive front end for the chat client.
//!
//! This module carries what the `chatpane` binary needs on top of the
//! library core:
//!
//! - [`config`]: CLI argument parsing and resolved configuration
//! - [`commands`]: slash command parsing

mod commands;
mod config;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{
    ChatArgs, ClientConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_PATH, DEFAULT_LOG_LEVEL,
    DEFAULT_LOGIN_PATH,
};
