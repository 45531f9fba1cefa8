//! Request headers derived from a [`TokenBundle`].

use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;

use crate::error::{Error, InvalidInputError};

use super::tokens::TokenBundle;

const ACCESS_TOKEN: HeaderName = HeaderName::from_static("access-token");
const CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");

/// Headers sent on every authenticated session, LMS, and channel request.
///
/// A `HeaderSet` is a pure function of the [`TokenBundle`] it was derived
/// from. It is rebuilt whenever the bundle is replaced and never edited.
#[derive(Clone)]
pub struct HeaderSet {
    cookie: String,
    map: HeaderMap,
}

impl HeaderSet {
    /// Derive the header set for a bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if a token contains characters that cannot be carried
    /// in an HTTP header.
    pub fn derive(tokens: &TokenBundle) -> Result<Self, Error> {
        let cookie = cookie_string(tokens);

        let mut map = HeaderMap::new();
        map.insert(ACCESS_TOKEN, sensitive(tokens.access_token.as_str(), "access-token")?);
        map.insert(COOKIE, sensitive(&cookie, "cookie")?);
        map.insert(CLIENT_ID, sensitive(&tokens.client_id, "x-client-id")?);

        Ok(Self { cookie, map })
    }

    /// The `Cookie` header value.
    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    pub(crate) fn as_map(&self) -> &HeaderMap {
        &self.map
    }
}

impl fmt::Debug for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderSet")
            .field("headers", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `aakash_login`, `ace-access-token`, then the web session pair, in that order.
fn cookie_string(tokens: &TokenBundle) -> String {
    let cookies = [
        ("aakash_login", tokens.aakash_login.as_str()),
        ("ace-access-token", tokens.access_token.as_str()),
        (
            tokens.web_session.key.as_str(),
            tokens.web_session.value.as_str(),
        ),
    ];

    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn sensitive(value: &str, header: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(value).map_err(|_| InvalidInputError::HeaderValue {
        header: header.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}
