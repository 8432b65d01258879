//! Interactive terminal front end for the chat client.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default address, chat collapsed
//! chatpane
//!
//! # Point at another backend and open the chat right away
//! chatpane --base-url http://chat.internal:8080 --open
//!
//! # Legacy backends that mount login at /auth
//! chatpane --login-path auth
//! ```
//!
//! # Commands
//!
//! - `/login [username]` - Log in
//! - `/toggle` - Open or collapse the chat
//! - `/open`, `/close` - Open or collapse the chat explicitly
//! - `/status` - Show session status
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use std::io;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use chatpane::chat::{ChatArgs, ChatCommand, ClientConfig, help_text, parse_command};
use chatpane::{ChatClient, HttpBackend, PlainTextRenderer, Renderer};

/// Main entry point for the chatpane application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("chatpane [OPTIONS]");
    let config = ClientConfig::from_args_and_env(args);
    init_tracing(&config.log_level);

    let backend = HttpBackend::from_config(&config)?;
    tracing::info!(login = %backend.login_url(), chat = %backend.chat_url(), "backend resolved");

    let client = ChatClient::new(backend);
    client.subscribe(Box::new(PlainTextRenderer::with_color(config.use_color)));
    let mut notices = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chat ({})", client.backend().base_url());
    println!("Type /toggle to open the chat, /help for commands, /quit to exit\n");

    if config.start_open {
        client.toggle();
    }

    loop {
        let prompt_login = client.view().login_prompt_visible();
        if prompt_login {
            match read_credentials(&mut rl, &client) {
                Ok(true) => {
                    client.submit_login().await;
                }
                Ok(false) => {
                    let mut view = client.view_mut();
                    view.take_credentials();
                    view.set_login_prompt(false);
                    drop(view);
                    notices.print_info("Login dismissed. Use /login to try again.");
                }
                Err(ReadlineError::Eof) => {
                    println!("\nGoodbye!");
                    break;
                }
                Err(err) => {
                    notices.print_error(&format!("Input error: {}", err));
                    break;
                }
            }
            continue;
        }

        let expanded = client.view().is_expanded();
        let readline = rl.readline(if expanded { "You: " } else { "> " });

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Toggle => {
                            client.toggle();
                        }
                        ChatCommand::Open => {
                            client.set_expanded(true);
                        }
                        ChatCommand::Close => {
                            client.set_expanded(false);
                        }
                        ChatCommand::Login(username) => {
                            if let Some(username) = username {
                                client.view_mut().set_username(username);
                            }
                            client.open_login();
                        }
                        ChatCommand::Status => {
                            print_status(&client);
                        }
                        ChatCommand::Invalid(message) => {
                            notices.print_error(&message);
                        }
                    }
                    continue;
                }

                if !expanded {
                    notices.print_info("The chat is collapsed. Use /toggle to open it.");
                    continue;
                }

                client.view_mut().set_draft(line);
                client.submit_draft().await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                notices.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Fill the login form. Enter on the username moves on to the password,
/// which is read without echo; Enter on the password submits. Returns
/// `Ok(false)` if the user backs out with Ctrl+C.
fn read_credentials(
    rl: &mut DefaultEditor,
    client: &ChatClient<HttpBackend>,
) -> Result<bool, ReadlineError> {
    if client.view().username().is_empty() {
        let username = match rl.readline("Username: ") {
            Ok(username) => username,
            Err(ReadlineError::Interrupted) => return Ok(false),
            Err(err) => return Err(err),
        };
        client.view_mut().set_username(username.trim());
    }
    let password = match rpassword::prompt_password("Password: ") {
        Ok(password) => password,
        Err(err) if err.kind() == io::ErrorKind::Interrupted => return Ok(false),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(ReadlineError::Eof);
        }
        Err(err) => return Err(ReadlineError::Io(err)),
    };
    client.view_mut().set_password(password);
    Ok(true)
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_status(client: &ChatClient<HttpBackend>) {
    let status = client.status();
    println!("    Session Status:");
    println!("      Backend: {}", client.backend().base_url());
    println!("      Auth: {}", status.auth);
    println!(
        "      Chat: {}",
        if status.expanded { "open" } else { "collapsed" }
    );
    println!("      Messages: {}", status.transcript_len);
    println!("      Requests in flight: {}", status.outstanding_requests);
}
