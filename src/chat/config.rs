//! Configuration types for the chat client.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration the backend and binary are built from.

use std::env;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::BASE_URL_ENV;

/// Default backend root.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Default login endpoint, relative to the base URL.
pub const DEFAULT_LOGIN_PATH: &str = "auth/login";

/// Default chat endpoint, relative to the base URL.
pub const DEFAULT_CHAT_PATH: &str = "chat";

/// Default log filter when RUST_LOG is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Command-line arguments for the chatpane tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Root URL of the backend.
    #[arrrg(optional, "Backend URL (default: $CHATPANE_BASE_URL or http://127.0.0.1:5000/)", "URL")]
    pub base_url: Option<String>,

    /// Login endpoint path.
    #[arrrg(optional, "Login endpoint path (default: auth/login)", "PATH")]
    pub login_path: Option<String>,

    /// Chat endpoint path.
    #[arrrg(optional, "Chat endpoint path (default: chat)", "PATH")]
    pub chat_path: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECS")]
    pub timeout_secs: Option<u64>,

    /// Start with the chat expanded.
    #[arrrg(flag, "Open the chat immediately")]
    pub open: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arrrg(optional, "Log level when RUST_LOG is unset (default: warn)", "LEVEL")]
    pub log_level: Option<String>,
}

/// Resolved configuration for a chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL every endpoint path is joined onto.
    pub base_url: String,

    /// Login endpoint path.
    pub login_path: String,

    /// Chat endpoint path.
    pub chat_path: String,

    /// Per-request timeout. `None` waits for the transport to resolve.
    pub timeout: Option<Duration>,

    /// Whether the chat surface starts expanded.
    pub start_open: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Log filter used when RUST_LOG is unset.
    pub log_level: String,
}

impl ClientConfig {
    /// Creates a new ClientConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: http://127.0.0.1:5000/
    /// - Login path: auth/login
    /// - Chat path: chat
    /// - Timeout: none
    /// - Surface: collapsed
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            timeout: None,
            start_open: false,
            use_color: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Sets the backend root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the login endpoint path.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Sets the chat endpoint path.
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Starts the surface expanded.
    pub fn opened(mut self) -> Self {
        self.start_open = true;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Resolves arguments, consulting CHATPANE_BASE_URL when no base URL
    /// was passed.
    pub fn from_args_and_env(args: ChatArgs) -> Self {
        let env_base = env::var(BASE_URL_ENV).ok();
        Self::resolve(args, env_base)
    }

    fn resolve(args: ChatArgs, env_base: Option<String>) -> Self {
        let defaults = ClientConfig::new();
        ClientConfig {
            base_url: args.base_url.or(env_base).unwrap_or(defaults.base_url),
            login_path: args.login_path.unwrap_or(defaults.login_path),
            chat_path: args.chat_path.unwrap_or(defaults.chat_path),
            timeout: args.timeout_secs.map(Duration::from_secs),
            start_open: args.open,
            use_color: !args.no_color,
            log_level: args.log_level.unwrap_or(defaults.log_level),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ClientConfig {
    fn from(args: ChatArgs) -> Self {
        Self::resolve(args, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url, "http://127.0.0.1:5000/");
        assert_eq!(config.login_path, "auth/login");
        assert_eq!(config.chat_path, "chat");
        assert!(config.timeout.is_none());
        assert!(!config.start_open);
        assert!(config.use_color);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ClientConfig::from(ChatArgs::default());
        assert_eq!(config, ClientConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://chat.local:8080".to_string()),
            login_path: Some("auth".to_string()),
            chat_path: Some("api/chat".to_string()),
            timeout_secs: Some(15),
            open: true,
            no_color: true,
            log_level: Some("debug".to_string()),
        };
        let config = ClientConfig::from(args);
        assert_eq!(config.base_url, "http://chat.local:8080");
        assert_eq!(config.login_path, "auth");
        assert_eq!(config.chat_path, "api/chat");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(config.start_open);
        assert!(!config.use_color);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn flag_beats_environment() {
        let args = ChatArgs {
            base_url: Some("http://flag".to_string()),
            ..ChatArgs::default()
        };
        let config = ClientConfig::resolve(args, Some("http://env".to_string()));
        assert_eq!(config.base_url, "http://flag");

        let config = ClientConfig::resolve(ChatArgs::default(), Some("http://env".to_string()));
        assert_eq!(config.base_url, "http://env");
    }

    #[test]
    fn config_builder_pattern() {
        let config = ClientConfig::new()
            .with_base_url("https://example.com")
            .with_login_path("auth")
            .with_chat_path("talk")
            .with_timeout(Some(Duration::from_secs(5)))
            .opened()
            .without_color();

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.login_path, "auth");
        assert_eq!(config.chat_path, "talk");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(config.start_open);
        assert!(!config.use_color);
    }
}
