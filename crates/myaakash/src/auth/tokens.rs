//! Token types for the session service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An access token, sent both as the `access-token` header and as the
/// `ace-access-token` cookie.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Use only when constructing request headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token, exchanged for a new [`TokenBundle`] by `refresh_login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The dynamically named web session cookie issued at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSession {
    pub key: String,
    pub value: String,
}

impl WebSession {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Debug for WebSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSession")
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Everything needed to authenticate against the session, LMS, and channel
/// services.
///
/// A bundle is produced by `login` and `refresh_login`, replaced wholesale on
/// refresh, and can be exported and handed back to `token_login` later.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub aakash_login: String,
    pub client_id: String,
    pub web_session: WebSession,
    pub login_timestamp: DateTime<Utc>,
}

impl TokenBundle {
    /// Build a bundle stamped with a fresh client id and the current time.
    pub fn issue(
        access_token: AccessToken,
        refresh_token: RefreshToken,
        aakash_login: impl Into<String>,
        web_session: WebSession,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            aakash_login: aakash_login.into(),
            client_id: Uuid::new_v4().to_string(),
            web_session,
            login_timestamp: Utc::now(),
        }
    }
}

impl fmt::Debug for TokenBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBundle")
            .field("access_token", &self.access_token)
            .field("refresh_token", &self.refresh_token)
            .field("aakash_login", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("web_session", &self.web_session)
            .field("login_timestamp", &self.login_timestamp)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> TokenBundle {
        TokenBundle::issue(
            AccessToken::new("access-secret"),
            RefreshToken::new("refresh-secret"),
            "login-secret",
            WebSession::new("web_session_ab12", "web-secret"),
        )
    }

    #[test]
    fn bundle_hides_secrets_in_debug() {
        let debug = format!("{:?}", bundle());
        assert!(!debug.contains("access-secret"));
        assert!(!debug.contains("refresh-secret"));
        assert!(!debug.contains("login-secret"));
        assert!(!debug.contains("web-secret"));
        assert!(debug.contains("web_session_ab12"));
    }

    #[test]
    fn issue_generates_distinct_client_ids() {
        assert_ne!(bundle().client_id, bundle().client_id);
    }

    #[test]
    fn bundle_survives_json_persistence() {
        let original = bundle();
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"access_token\":\"access-secret\""));

        let restored: TokenBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }
}
