//! Terminal rendering for the chat surface.
//!
//! [`PlainTextRenderer`] subscribes to the view model and draws each change
//! as it happens: transcript entries styled by sender, a transient typing
//! line, and notices when the surface or the login prompt changes.

use std::io::{self, Stdout, Write};

use crate::types::Sender;
use crate::view::{TranscriptEntry, ViewEvent, ViewObserver};

/// ANSI escape code for bold text (used for the sender label).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for the typing line).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for user entries).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for bot entries).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for system entries).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Return to column zero and erase the line.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Text of the typing line.
const TYPING_TEXT: &str = "Bot is typing...";

/// Trait for drawing chat output.
pub trait Renderer {
    /// Draw one transcript entry.
    fn print_entry(&mut self, entry: &TranscriptEntry);

    /// Show the typing line.
    fn show_typing(&mut self);

    /// Remove the typing line.
    fn hide_typing(&mut self);

    /// Print an error message that is not part of the transcript.
    fn print_error(&mut self, error: &str);

    /// Print an informational message that is not part of the transcript.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write = Stdout> {
    out: W,
    use_color: bool,
    typing_shown: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a renderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a renderer on stdout with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            typing_shown: false,
        }
    }

    /// Consumes the renderer, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    // The typing line sits below the transcript; anything printed while it
    // is up has to clear it first and redraw it after.
    fn with_typing_cleared(&mut self, draw: impl FnOnce(&mut Self)) {
        let was_shown = self.typing_shown;
        if was_shown {
            self.hide_typing();
        }
        draw(self);
        if was_shown {
            self.show_typing();
        }
        self.flush();
    }
}

fn sender_color(sender: Sender) -> &'static str {
    match sender {
        Sender::User => ANSI_CYAN,
        Sender::Bot => ANSI_GREEN,
        Sender::System => ANSI_YELLOW,
    }
}

impl<W: Write> Renderer for PlainTextRenderer<W> {
    fn print_entry(&mut self, entry: &TranscriptEntry) {
        self.with_typing_cleared(|r| {
            let label = entry.sender.label();
            let text = &entry.text;
            let _ = if r.use_color {
                let color = sender_color(entry.sender);
                writeln!(r.out, "{ANSI_BOLD}{color}{label}:{ANSI_RESET} {text}")
            } else {
                writeln!(r.out, "{label}: {text}")
            };
        });
    }

    fn show_typing(&mut self) {
        if self.typing_shown {
            return;
        }
        self.typing_shown = true;
        let _ = if self.use_color {
            write!(self.out, "{ANSI_DIM}{TYPING_TEXT}{ANSI_RESET}")
        } else {
            writeln!(self.out, "[{TYPING_TEXT}]")
        };
        self.flush();
    }

    fn hide_typing(&mut self) {
        if !self.typing_shown {
            return;
        }
        self.typing_shown = false;
        // Without ANSI the line cannot be erased; it stays in the scrollback.
        if self.use_color {
            let _ = write!(self.out, "{ANSI_CLEAR_LINE}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.with_typing_cleared(|r| {
            let _ = if r.use_color {
                writeln!(r.out, "{ANSI_RED}Error: {error}{ANSI_RESET}")
            } else {
                writeln!(r.out, "Error: {error}")
            };
        });
    }

    fn print_info(&mut self, info: &str) {
        self.with_typing_cleared(|r| {
            let _ = if r.use_color {
                writeln!(r.out, "{ANSI_DIM}{info}{ANSI_RESET}")
            } else {
                writeln!(r.out, "{info}")
            };
        });
    }
}

impl<W: Write> ViewObserver for PlainTextRenderer<W> {
    fn on_event(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::EntryAppended { entry, .. } => self.print_entry(entry),
            ViewEvent::TypingChanged(true) => self.show_typing(),
            ViewEvent::TypingChanged(false) => self.hide_typing(),
            ViewEvent::SurfaceToggled(true) => self.print_info("Chat opened."),
            ViewEvent::SurfaceToggled(false) => self.print_info("Chat collapsed."),
            ViewEvent::LoginPromptChanged(true) => self.print_info("Login required."),
            // A terminal scrolls on its own; positions only matter to a
            // windowed front end.
            ViewEvent::ScrolledTo(_)
            | ViewEvent::LoginPromptChanged(false)
            | ViewEvent::AuthChanged(_)
            | ViewEvent::Moved(_) => {}
        }
    }
}
