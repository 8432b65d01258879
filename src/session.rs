//! Authentication state for one client lifetime.
//!
//! The [`Session`] is the only holder of the bearer token. It moves through
//! `LoggedOut -> LoggingIn -> LoggedIn`, falling back to `LoggedOut` when a
//! login attempt fails. Nothing on the client side ever expires a token.
//!
//! Login attempts may overlap. Each one is numbered when it begins, and a
//! result is applied only if no later attempt has already settled the
//! session, so an older answer never overwrites a newer one.

use std::fmt;

use crate::types::SessionToken;

/// Where the session is in the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No token held.
    LoggedOut,
    /// A login request is outstanding.
    LoggingIn,
    /// A token is held.
    LoggedIn,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthState::LoggedOut => "logged out",
            AuthState::LoggingIn => "logging in",
            AuthState::LoggedIn => "logged in",
        };
        f.write_str(label)
    }
}

/// Ticket for one login attempt, handed out by [`Session::begin_login`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoginAttempt(u64);

/// In-memory session holding the bearer token.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<SessionToken>,
    pending: usize,
    issued: u64,
    settled: u64,
}

impl Session {
    /// A fresh, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state. `LoggingIn` while any attempt is outstanding.
    pub fn state(&self) -> AuthState {
        if self.pending > 0 {
            AuthState::LoggingIn
        } else if self.token.is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    /// True when a token is held and no login is outstanding.
    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::LoggedIn
    }

    /// The held token, if any.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Number of login attempts still waiting for an answer.
    pub fn pending_logins(&self) -> usize {
        self.pending
    }

    /// Enter `LoggingIn` and number the new attempt. Any previously held
    /// token is dropped.
    pub fn begin_login(&mut self) -> LoginAttempt {
        self.issued += 1;
        self.pending += 1;
        self.token = None;
        LoginAttempt(self.issued)
    }

    /// Finish `attempt`. `Some` stores the token, `None` clears it, unless a
    /// later attempt has already settled the session; then the result is
    /// discarded. Returns whether the result was applied.
    pub fn complete_login(&mut self, attempt: LoginAttempt, token: Option<SessionToken>) -> bool {
        self.pending = self.pending.saturating_sub(1);
        if attempt.0 <= self.settled {
            return false;
        }
        self.settled = attempt.0;
        self.token = token;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = Session::new();
        assert_eq!(session.state(), AuthState::LoggedOut);
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn successful_login() {
        let mut session = Session::new();
        let attempt = session.begin_login();
        assert_eq!(session.state(), AuthState::LoggingIn);
        assert!(!session.is_authenticated());

        assert!(session.complete_login(attempt, SessionToken::new("T")));
        assert_eq!(session.state(), AuthState::LoggedIn);
        assert_eq!(session.token().map(SessionToken::as_str), Some("T"));
    }

    #[test]
    fn failed_login_returns_to_logged_out() {
        let mut session = Session::new();
        let attempt = session.begin_login();
        assert!(session.complete_login(attempt, None));
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[test]
    fn relogin_failure_clears_previous_token() {
        let mut session = Session::new();
        let first = session.begin_login();
        session.complete_login(first, SessionToken::new("old"));
        assert!(session.is_authenticated());

        let second = session.begin_login();
        assert_eq!(session.state(), AuthState::LoggingIn);
        assert!(session.complete_login(second, None));
        assert_eq!(session.state(), AuthState::LoggedOut);
        assert!(session.token().is_none());
    }

    #[test]
    fn older_failure_does_not_clear_newer_token() {
        let mut session = Session::new();
        let first = session.begin_login();
        let second = session.begin_login();
        assert!(first < second);

        assert!(session.complete_login(second, SessionToken::new("new")));
        // The first attempt is still outstanding.
        assert_eq!(session.state(), AuthState::LoggingIn);
        assert_eq!(session.pending_logins(), 1);

        assert!(!session.complete_login(first, None));
        assert_eq!(session.state(), AuthState::LoggedIn);
        assert_eq!(session.token().map(SessionToken::as_str), Some("new"));
    }

    #[test]
    fn older_success_does_not_replace_newer_token() {
        let mut session = Session::new();
        let first = session.begin_login();
        let second = session.begin_login();

        assert!(session.complete_login(second, SessionToken::new("new")));
        assert!(!session.complete_login(first, SessionToken::new("old")));
        assert_eq!(session.token().map(SessionToken::as_str), Some("new"));
    }

    #[test]
    fn newer_result_overrides_older_one() {
        let mut session = Session::new();
        let first = session.begin_login();
        let second = session.begin_login();

        assert!(session.complete_login(first, SessionToken::new("old")));
        assert_eq!(session.state(), AuthState::LoggingIn);
        assert!(session.complete_login(second, None));
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[test]
    fn state_labels() {
        assert_eq!(AuthState::LoggedOut.to_string(), "logged out");
        assert_eq!(AuthState::LoggingIn.to_string(), "logging in");
        assert_eq!(AuthState::LoggedIn.to_string(), "logged in");
    }
}
