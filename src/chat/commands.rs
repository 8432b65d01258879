//! Slash command parsing for the chat binary.
//!
//! Input that starts with `/` controls the client and is never sent to the
//! chat endpoint.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Show the login prompt, optionally pre-filling the username.
    Login(Option<String>),

    /// Expand or collapse the chat.
    Toggle,

    /// Expand the chat; a no-op if it is already open.
    Open,

    /// Collapse the chat; a no-op if it is already collapsed.
    Close,

    /// Show the session status.
    Status,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use chatpane::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/login alice").is_some());
/// assert!(parse_command("Hello there").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "login" => ChatCommand::Login(argument.map(|s| s.to_string())),
        "toggle" | "open" | "close" => match (command.as_str(), argument) {
            (_, Some(_)) => ChatCommand::Invalid(format!("/{command} takes no arguments")),
            ("open", None) => ChatCommand::Open,
            ("close", None) => ChatCommand::Close,
            _ => ChatCommand::Toggle,
        },
        "status" | "stats" => ChatCommand::Status,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /login [username]      Log in (prompts for anything not given)
  /toggle                Open or collapse the chat
  /open, /close          Open or collapse the chat explicitly
  /status                Show session status
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_login() {
        assert_eq!(parse_command("/login"), Some(ChatCommand::Login(None)));
        assert_eq!(
            parse_command("/LOGIN   alice  "),
            Some(ChatCommand::Login(Some("alice".to_string())))
        );
    }

    #[test]
    fn parse_toggle() {
        assert_eq!(parse_command("/toggle"), Some(ChatCommand::Toggle));
        assert_eq!(parse_command("/open"), Some(ChatCommand::Open));
        assert_eq!(parse_command("/close"), Some(ChatCommand::Close));
        assert!(matches!(
            parse_command("/close please"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/toggle now"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("no arguments")
        ));
    }

    #[test]
    fn parse_status_and_help() {
        assert_eq!(parse_command("/status"), Some(ChatCommand::Status));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/model gpt"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello there"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_lists_commands() {
        let help = help_text();
        assert!(help.contains("/login"));
        assert!(help.contains("/toggle"));
        assert!(help.contains("/quit"));
    }
}
