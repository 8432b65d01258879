//! The chat client controller.
//!
//! [`ChatClient`] is constructed once per client lifetime. It owns the
//! backend, the [`Session`] and the [`ViewModel`], and implements the login
//! and send-message operations on top of them. Every failure ends up as a
//! System entry in the transcript; none of the operations return an error.
//!
//! All operations take `&self`: several may be outstanding at once on the
//! same task, and there is no lock against double submission. Interior state
//! lives in `RefCell`s whose borrows never span an `.await`.

use std::cell::{Ref, RefCell, RefMut};

use crate::client::ChatBackend;
use crate::observability::{LOGIN_FAILURES, LOGIN_SUCCESSES, SEND_REJECTED_UNAUTHENTICATED};
use crate::session::{AuthState, Session};
use crate::types::{Credentials, Sender};
use crate::view::{TypingIndicator, ViewModel, ViewObserver};

/// Appended after a successful login.
pub const LOGIN_SUCCESS_TEXT: &str = "✅ Login successful! You can now proceed.";

/// Appended when the backend rejects the credentials.
pub const LOGIN_FAILED_TEXT: &str = "❌ Login failed. Try again.";

/// Appended when the login request itself fails.
pub const LOGIN_ERROR_TEXT: &str = "⚠️ An error occurred. Please try again.";

/// Appended when a message is sent without a session token.
pub const LOGIN_REQUIRED_TEXT: &str = "🔒 Please login to continue.";

/// Appended when a chat request fails.
pub const SEND_ERROR_TEXT: &str = "⚠️ Could not send message.";

/// How a login attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A token was issued and stored.
    Success,
    /// The backend answered but did not issue a token.
    Rejected,
    /// The request failed before a usable answer arrived.
    Error,
}

/// How a send attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send; the transcript is untouched.
    Empty,
    /// No token held; the login prompt was raised instead.
    LoginRequired,
    /// The bot replied.
    Replied,
    /// The request failed.
    Failed,
}

/// A point-in-time summary of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStatus {
    /// Current session state.
    pub auth: AuthState,
    /// Number of transcript entries.
    pub transcript_len: usize,
    /// Chat requests currently outstanding.
    pub outstanding_requests: usize,
    /// Whether the surface is expanded.
    pub expanded: bool,
    /// Whether the login prompt is showing.
    pub login_prompt: bool,
}

/// The chat client controller.
pub struct ChatClient<B: ChatBackend> {
    backend: B,
    session: RefCell<Session>,
    view: RefCell<ViewModel>,
}

impl<B: ChatBackend> ChatClient<B> {
    /// Creates a logged-out client with a collapsed surface.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: RefCell::new(Session::new()),
            view: RefCell::new(ViewModel::new()),
        }
    }

    /// The backend this client talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read access to the view model.
    ///
    /// # Panics
    ///
    /// Panics if the view is mutably borrowed, which only happens inside an
    /// observer callback.
    pub fn view(&self) -> Ref<'_, ViewModel> {
        self.view.borrow()
    }

    /// Write access to the view model, for drafts and pointer input.
    pub fn view_mut(&self) -> RefMut<'_, ViewModel> {
        self.view.borrow_mut()
    }

    /// Register an observer on the view model.
    pub fn subscribe(&self, observer: Box<dyn ViewObserver>) {
        self.view.borrow_mut().subscribe(observer);
    }

    /// Current session state.
    pub fn auth_state(&self) -> AuthState {
        self.session.borrow().state()
    }

    /// True when a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Snapshot of the client.
    pub fn status(&self) -> ClientStatus {
        let view = self.view.borrow();
        ClientStatus {
            auth: self.auth_state(),
            transcript_len: view.transcript().len(),
            outstanding_requests: view.outstanding_requests(),
            expanded: view.is_expanded(),
            login_prompt: view.login_prompt_visible(),
        }
    }

    /// Flip the surface between collapsed and expanded. Expanding while not
    /// logged in raises the login prompt.
    pub fn toggle(&self) {
        let expanded = !self.view.borrow().is_expanded();
        self.set_expanded(expanded);
    }

    /// Expand or collapse the surface. Expanding while not logged in raises
    /// the login prompt; collapsing an already collapsed surface does
    /// nothing.
    pub fn set_expanded(&self, expanded: bool) {
        let authenticated = self.is_authenticated();
        let mut view = self.view.borrow_mut();
        view.set_expanded(expanded);
        if expanded && !authenticated {
            view.set_login_prompt(true);
        }
    }

    /// Raise the login prompt.
    pub fn open_login(&self) {
        self.view.borrow_mut().set_login_prompt(true);
    }

    /// Log in with the credentials currently in the login form. The form is
    /// cleared before the request goes out.
    pub async fn submit_login(&self) -> LoginOutcome {
        let credentials = self.view.borrow_mut().take_credentials();
        self.login(credentials).await
    }

    /// Exchange `credentials` for a session token.
    ///
    /// On success the token is stored, the login prompt is hidden and a
    /// confirmation is appended. On rejection or error a System entry is
    /// appended and the session ends logged out. When attempts overlap, the
    /// transcript reports each one, but the session keeps the result of the
    /// most recently started attempt that has answered.
    pub async fn login(&self, credentials: Credentials) -> LoginOutcome {
        let attempt = self.session.borrow_mut().begin_login();
        self.publish_auth_state();

        let username = credentials.username.clone();
        let (outcome, token) = match self.backend.login(credentials).await {
            Ok(response) => match response.into_token() {
                Some(token) => (LoginOutcome::Success, Some(token)),
                None => (LoginOutcome::Rejected, None),
            },
            Err(err) if err.status_code().is_some() => {
                tracing::info!(username = %username, error = %err, "login rejected");
                (LoginOutcome::Rejected, None)
            }
            Err(err) => {
                tracing::warn!(username = %username, error = %err, "login request failed");
                (LoginOutcome::Error, None)
            }
        };
        if !self.session.borrow_mut().complete_login(attempt, token) {
            tracing::debug!(?attempt, ?outcome, "superseded login result discarded");
        }
        self.publish_auth_state();

        let mut view = self.view.borrow_mut();
        match outcome {
            LoginOutcome::Success => {
                LOGIN_SUCCESSES.click();
                tracing::info!(username = %username, "logged in");
                view.set_login_prompt(false);
                view.append(Sender::System, LOGIN_SUCCESS_TEXT);
            }
            LoginOutcome::Rejected => {
                LOGIN_FAILURES.click();
                view.append(Sender::System, LOGIN_FAILED_TEXT);
            }
            LoginOutcome::Error => {
                LOGIN_FAILURES.click();
                view.append(Sender::System, LOGIN_ERROR_TEXT);
            }
        }
        outcome
    }

    /// Send the composed draft.
    ///
    /// A blank draft is left in place and nothing happens. Otherwise the
    /// draft is cleared before anything else, whatever the send's outcome.
    pub async fn submit_draft(&self) -> SendOutcome {
        let draft = {
            let mut view = self.view.borrow_mut();
            if view.draft().trim().is_empty() {
                return SendOutcome::Empty;
            }
            view.take_draft()
        };
        self.send_message(&draft).await
    }

    /// Send one message to the chat endpoint.
    ///
    /// The text is trimmed; blank text is a no-op. Without a token the
    /// backend is not contacted: a System entry is appended and the login
    /// prompt raised. With a token, the User entry is appended right away,
    /// the typing indicator is shown for the duration of the request, and
    /// the reply (or a System error) is appended once it resolves.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Empty;
        }

        let token = self.session.borrow().token().cloned();
        let Some(token) = token else {
            SEND_REJECTED_UNAUTHENTICATED.click();
            tracing::info!("send attempted without a session token");
            let mut view = self.view.borrow_mut();
            view.append(Sender::System, LOGIN_REQUIRED_TEXT);
            view.set_login_prompt(true);
            return SendOutcome::LoginRequired;
        };

        self.view.borrow_mut().append(Sender::User, message);
        let result = {
            let _typing = TypingIndicator::show(&self.view);
            self.backend.chat(&token, message).await
        };

        let mut view = self.view.borrow_mut();
        match result {
            Ok(response) => {
                view.append(Sender::Bot, response.reply);
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                view.append(Sender::System, SEND_ERROR_TEXT);
                SendOutcome::Failed
            }
        }
    }

    fn publish_auth_state(&self) {
        let state = self.auth_state();
        self.view.borrow_mut().set_auth_state(state);
    }
}
