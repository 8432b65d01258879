use serde::{Deserialize, Serialize};

use crate::types::SessionToken;

/// The `status` value the login endpoint uses to signal success.
pub const LOGIN_SUCCESS_STATUS: &str = "success";

/// Body of a login response.
///
/// Both fields are optional on the wire: a failure payload such as
/// `{"status": "fail"}` or even `{}` still decodes, and is judged by
/// [`LoginResponse::into_token`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// `"success"` on success; anything else is a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The bearer token, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// A success payload carrying `token`.
    pub fn success<S: Into<String>>(token: S) -> Self {
        Self {
            status: Some(LOGIN_SUCCESS_STATUS.to_string()),
            access_token: Some(token.into()),
        }
    }

    /// A rejection payload.
    pub fn failure() -> Self {
        Self {
            status: Some("fail".to_string()),
            access_token: None,
        }
    }

    /// True when the payload reports success.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(LOGIN_SUCCESS_STATUS)
    }

    /// The session token, if and only if the payload is a success carrying a
    /// non-empty token.
    pub fn into_token(self) -> Option<SessionToken> {
        if !self.is_success() {
            return None;
        }
        self.access_token.and_then(SessionToken::new)
    }
}
