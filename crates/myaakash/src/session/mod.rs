//! Password-authenticated session against the session, LMS, and channel services.

mod channel;
mod lms;

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::api::{
    ApiClient, LOGOUT, LoginRequest, NO_PARAMS, RefreshRequest, SessionGrant, USER, USER_SESSION,
    decode,
};
use crate::auth::{AccessToken, Credentials, HeaderSet, RefreshToken, TokenBundle, WebSession};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::types::{Profile, ServiceUrl};

/// Login profile the session service expects for student accounts.
const STUDENT_PROFILE: &str = "student";

/// A client for one student's session.
///
/// The client starts logged out. [`login`](Self::login) or
/// [`token_login`](Self::token_login) establish a session; every other
/// network operation fails with [`Error::NotLoggedIn`] until then, and again
/// after [`logout`](Self::logout).
///
/// # Example
///
/// ```no_run
/// use myaakash::{AakashSession, ClientConfig, Credentials, TestStatus};
///
/// # async fn example() -> Result<(), myaakash::Error> {
/// let mut session = AakashSession::new(ClientConfig::default())?;
/// let user_id = session.login(Credentials::new("00001234567", "password")).await?;
/// println!("logged in as {user_id}");
///
/// for test in session.get_tests(TestStatus::Live).await? {
///     println!("{}", test["test_name"]);
/// }
///
/// session.logout().await?;
/// # Ok(())
/// # }
/// ```
pub struct AakashSession {
    config: ClientConfig,
    client: ApiClient,
    state: Option<SessionState>,
}

struct SessionState {
    tokens: TokenBundle,
    headers: HeaderSet,
    profile: Option<Profile>,
}

impl AakashSession {
    /// Create a logged-out client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = ApiClient::new(config.http_client()?);
        Ok(Self {
            config,
            client,
            state: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_some()
    }

    /// The profile from the last successful fetch, if any.
    pub fn profile(&self) -> Option<&Profile> {
        self.state.as_ref().and_then(|s| s.profile.as_ref())
    }

    pub fn tokens(&self) -> Option<&TokenBundle> {
        self.state.as_ref().map(|s| &s.tokens)
    }

    pub fn headers(&self) -> Option<&HeaderSet> {
        self.state.as_ref().map(|s| &s.headers)
    }

    /// Export the current token bundle for a later [`token_login`](Self::token_login).
    ///
    /// # Security
    ///
    /// The bundle grants access to the account; store it accordingly.
    pub fn export_tokens(&self) -> Option<TokenBundle> {
        self.tokens().cloned()
    }

    /// Log in with a PSID (or mobile number) and password.
    ///
    /// On success the token bundle is stored, the header set derived, and the
    /// profile fetched. Returns the server's user id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Login`] with the server's message if the credentials
    /// are rejected. If the credentials are accepted but the profile fetch
    /// fails, that error is returned and the client is left logged out.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier()))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<String> {
        info!("Creating new session");

        let request = LoginRequest {
            password: credentials.password(),
            profile: STUDENT_PROFILE,
            psid_or_mobile: credentials.identifier(),
        };

        let url = self.config.session_api.endpoint(USER_SESSION);
        let data = self
            .client
            .post(&url, &request, &HeaderMap::new())
            .await?
            .into_login()?;

        let user_id = self.install_grant(decode(data)?)?;
        debug!(%user_id, "Session created");

        if let Err(err) = self.get_profile().await {
            self.state = None;
            return Err(err);
        }
        Ok(user_id)
    }

    /// Resume a session from a previously exported token bundle.
    ///
    /// The profile is fetched to validate the bundle. If the service answers
    /// "Invalid Session ID", one [`refresh_login`](Self::refresh_login) is
    /// attempted and its outcome returned. On any failure the client is left
    /// logged out.
    #[instrument(skip(self, tokens))]
    pub async fn token_login(&mut self, tokens: TokenBundle) -> Result<String> {
        info!("Resuming session from tokens");

        self.establish(tokens)?;

        let outcome = match self.get_profile().await {
            Ok(profile) => Ok(profile.user_id),
            Err(err) if err.is_invalid_session() => {
                warn!("Stored session rejected, refreshing tokens");
                self.refresh_login().await
            }
            Err(err) => Err(err),
        };

        if outcome.is_err() {
            self.state = None;
        }
        outcome
    }

    /// Exchange the stored refresh token for a new token bundle.
    ///
    /// The bundle is replaced wholesale, the header set re-derived, and the
    /// profile re-fetched. Returns the server's user id.
    #[instrument(skip(self))]
    pub async fn refresh_login(&mut self) -> Result<String> {
        info!("Refreshing session");

        let state = self.session()?;
        let request = RefreshRequest {
            refresh_token: state.tokens.refresh_token.as_str(),
        };

        let url = self.config.session_api.endpoint(USER_SESSION);
        let data = self
            .client
            .put(&url, &request, state.headers.as_map())
            .await?
            .into_login()?;

        let user_id = self.install_grant(decode(data)?)?;
        debug!(%user_id, "Session refreshed");

        self.get_profile().await?;
        Ok(user_id)
    }

    /// Invalidate the session server-side, then forget all local session state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the server rejects the logout; local state is
    /// kept in that case.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<()> {
        info!("Logging out");

        let state = self.session()?;
        let url = self.config.session_api.endpoint(LOGOUT);
        self.client
            .post_empty(&url, state.headers.as_map())
            .await?
            .into_api()?;

        self.state = None;
        debug!("Session cleared");
        Ok(())
    }

    /// Fetch the student's profile and remember it.
    #[instrument(skip(self))]
    pub async fn get_profile(&mut self) -> Result<Profile> {
        let data = self.fetch(&self.config.session_api, USER, NO_PARAMS).await?;
        let profile: Profile = decode(data)?;

        if let Some(state) = self.state.as_mut() {
            state.profile = Some(profile.clone());
        }
        Ok(profile)
    }

    fn session(&self) -> Result<&SessionState> {
        self.state.as_ref().ok_or(Error::NotLoggedIn)
    }

    /// Replace the token bundle and re-derive the header set.
    fn establish(&mut self, tokens: TokenBundle) -> Result<()> {
        let headers = HeaderSet::derive(&tokens)?;
        self.state = Some(SessionState {
            tokens,
            headers,
            profile: None,
        });
        Ok(())
    }

    fn install_grant(&mut self, grant: SessionGrant) -> Result<String> {
        let tokens = TokenBundle::issue(
            AccessToken::new(grant.access_token),
            RefreshToken::new(grant.refresh_token),
            grant.aakash_login_value,
            WebSession::new(grant.web_session_key, grant.web_session_value),
        );
        self.establish(tokens)?;
        Ok(grant.user_id)
    }

    /// Authenticated GET returning the "OK" payload.
    async fn fetch<Q>(&self, service: &ServiceUrl, path: &str, params: &Q) -> Result<Value>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        self.authed_get(service.endpoint(path), params).await
    }

    /// Like [`fetch`](Self::fetch), for paths that embed caller-supplied ids.
    async fn fetch_resource<'a, I, Q>(
        &self,
        service: &ServiceUrl,
        segments: I,
        params: &Q,
    ) -> Result<Value>
    where
        I: IntoIterator<Item = &'a str>,
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        self.session()?;
        self.authed_get(service.resource(segments)?, params).await
    }

    async fn authed_get<Q>(&self, url: String, params: &Q) -> Result<Value>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        let state = self.session()?;
        self.client
            .get(&url, params, state.headers.as_map())
            .await?
            .into_api()
    }
}

impl std::fmt::Debug for AakashSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AakashSession")
            .field("session_api", &self.config.session_api)
            .field("logged_in", &self.is_logged_in())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
