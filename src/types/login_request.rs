use serde::{Deserialize, Serialize};

use crate::types::Credentials;

/// Body of a `POST /auth/login` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The username as typed.
    pub username: String,
    /// The password as typed.
    pub password: String,
}

impl From<Credentials> for LoginRequest {
    fn from(credentials: Credentials) -> Self {
        Self {
            username: credentials.username,
            password: credentials.password,
        }
    }
}
