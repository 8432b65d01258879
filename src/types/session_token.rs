use std::fmt;

/// An opaque bearer credential issued by the login endpoint.
///
/// The token is held in memory only. Its `Debug` output is redacted so it
/// never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a token string. Returns `None` for an empty token, which the
    /// client treats the same as no token at all.
    pub fn new<S: Into<String>>(token: S) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_absent() {
        assert!(SessionToken::new("").is_none());
    }

    #[test]
    fn bearer_header_value() {
        let token = SessionToken::new("T").unwrap();
        assert_eq!(token.as_str(), "T");
        assert_eq!(token.bearer(), "Bearer T");
    }

    #[test]
    fn debug_is_redacted() {
        let token = SessionToken::new("secret-value").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-value"));
    }
}
