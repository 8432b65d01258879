//! Declarative view state for the chat surface.
//!
//! [`ViewModel`] owns everything a presentation layer needs: the ordered
//! transcript, the authentication state, whether the surface is expanded,
//! whether the login prompt is up, the typing indicator, the drafts and the
//! surface position. Every mutation is announced as a [`ViewEvent`] to the
//! subscribed [`ViewObserver`]s, which is how the terminal renderer draws.

use std::cell::RefCell;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::drag::{Draggable, Point};
use crate::observability::TRANSCRIPT_ENTRIES;
use crate::session::AuthState;
use crate::types::{Credentials, Sender};

/// Where the surface sits before the user moves it.
pub const DEFAULT_DOCK: Point = Point::new(0, 0);

/// One line of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Who produced the text.
    pub sender: Sender,
    /// The text, verbatim.
    pub text: String,
}

impl TranscriptEntry {
    /// Creates an entry.
    pub fn new<S: Into<String>>(sender: Sender, text: S) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

/// A change to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// An entry was appended at `index`.
    EntryAppended {
        /// Position of the entry in the transcript.
        index: usize,
        /// The entry itself.
        entry: TranscriptEntry,
    },
    /// The view scrolled to the entry at this index.
    ScrolledTo(usize),
    /// The typing indicator appeared (`true`) or went away (`false`).
    TypingChanged(bool),
    /// The session moved to a new state.
    AuthChanged(AuthState),
    /// The surface was expanded (`true`) or collapsed (`false`).
    SurfaceToggled(bool),
    /// The login prompt was shown (`true`) or hidden (`false`).
    LoginPromptChanged(bool),
    /// The surface was dragged to a new top-left corner.
    Moved(Point),
}

/// Receives every [`ViewEvent`] in the order they happen.
pub trait ViewObserver {
    /// Called after the view model has applied the change.
    fn on_event(&mut self, event: &ViewEvent);
}

/// The chat surface's state.
pub struct ViewModel {
    transcript: Vec<TranscriptEntry>,
    scroll: Option<usize>,
    outstanding: usize,
    auth: AuthState,
    expanded: bool,
    login_prompt: bool,
    draft: String,
    login_form: Credentials,
    drag: Draggable,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl ViewModel {
    /// A collapsed, logged-out view with an empty transcript.
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            scroll: None,
            outstanding: 0,
            auth: AuthState::LoggedOut,
            expanded: false,
            login_prompt: false,
            draft: String::new(),
            login_form: Credentials::default(),
            drag: Draggable::new(DEFAULT_DOCK),
            observers: Vec::new(),
        }
    }

    /// Register an observer. It sees only events after this call.
    pub fn subscribe(&mut self, observer: Box<dyn ViewObserver>) {
        self.observers.push(observer);
    }

    fn emit(&mut self, event: ViewEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(&event);
        }
    }

    /// The transcript, in append order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Index of the entry the view is scrolled to.
    pub fn scroll_position(&self) -> Option<usize> {
        self.scroll
    }

    /// Append an entry and scroll to it.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) {
        let entry = TranscriptEntry::new(sender, text);
        let index = self.transcript.len();
        self.transcript.push(entry.clone());
        TRANSCRIPT_ENTRIES.click();
        self.emit(ViewEvent::EntryAppended { index, entry });
        self.scroll = Some(index);
        self.emit(ViewEvent::ScrolledTo(index));
    }

    /// True while at least one chat request is outstanding.
    pub fn is_typing(&self) -> bool {
        self.outstanding > 0
    }

    /// Number of chat requests currently outstanding.
    pub fn outstanding_requests(&self) -> usize {
        self.outstanding
    }

    fn request_started(&mut self) {
        self.outstanding += 1;
        if self.outstanding == 1 {
            self.emit(ViewEvent::TypingChanged(true));
        }
    }

    fn request_finished(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.emit(ViewEvent::TypingChanged(false));
        }
    }

    /// The session state last published to the view.
    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    /// Publish a new session state.
    pub fn set_auth_state(&mut self, state: AuthState) {
        if self.auth != state {
            self.auth = state;
            self.emit(ViewEvent::AuthChanged(state));
        }
    }

    /// True when the surface is expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Expand or collapse the surface.
    pub fn set_expanded(&mut self, expanded: bool) {
        if self.expanded != expanded {
            self.expanded = expanded;
            self.emit(ViewEvent::SurfaceToggled(expanded));
        }
    }

    /// True while the login prompt is showing.
    pub fn login_prompt_visible(&self) -> bool {
        self.login_prompt
    }

    /// Show or hide the login prompt.
    pub fn set_login_prompt(&mut self, visible: bool) {
        if self.login_prompt != visible {
            self.login_prompt = visible;
            self.emit(ViewEvent::LoginPromptChanged(visible));
        }
    }

    /// The message being composed.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the message being composed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Take the draft, leaving it empty.
    pub fn take_draft(&mut self) -> String {
        mem::take(&mut self.draft)
    }

    /// The username currently typed into the login form.
    pub fn username(&self) -> &str {
        &self.login_form.username
    }

    /// Set the username field.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.login_form.username = username.into();
    }

    /// Set the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.login_form.password = password.into();
    }

    /// Take both login fields, leaving the form empty.
    pub fn take_credentials(&mut self) -> Credentials {
        mem::take(&mut self.login_form)
    }

    /// Current top-left corner of the surface.
    pub fn position(&self) -> Point {
        self.drag.position()
    }

    /// Pointer pressed on the surface's drag handle.
    pub fn pointer_down(&mut self, at: Point) {
        self.drag.pointer_down(at);
    }

    /// Pointer moved; repositions the surface while dragging.
    pub fn pointer_move(&mut self, at: Point) {
        if let Some(moved) = self.drag.pointer_move(at) {
            self.emit(ViewEvent::Moved(moved));
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the typing indicator raised for as long as it lives.
///
/// Dropping the guard lowers the indicator, so every way out of a chat
/// request (reply, HTTP error, transport error, the future being dropped)
/// clears it.
pub struct TypingIndicator<'a> {
    view: &'a RefCell<ViewModel>,
}

impl<'a> TypingIndicator<'a> {
    /// Raise the indicator on `view`.
    pub fn show(view: &'a RefCell<ViewModel>) -> Self {
        view.borrow_mut().request_started();
        Self { view }
    }
}

impl Drop for TypingIndicator<'_> {
    fn drop(&mut self) {
        self.view.borrow_mut().request_finished();
    }
}
