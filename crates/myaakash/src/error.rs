//! Error types for the myaakash client.
//!
//! Every failure surfaces through [`Error`], with explicit variants so callers
//! can tell a missing session apart from a rejected login, a rejected API call,
//! and a transport failure.

use thiserror::Error;

/// Message the session service returns when the access token is no longer valid.
pub const INVALID_SESSION_MESSAGE: &str = "Invalid Session ID";

/// The unified error type for myaakash operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An authenticated operation was called before a session was established.
    #[error("not logged in")]
    NotLoggedIn,

    /// Login, refresh, or exam initialisation was rejected by the server.
    #[error("login failed: {0}")]
    Login(#[from] LoginError),

    /// An authenticated endpoint replied with something other than "OK".
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Input validation errors (service URL, access URL, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The server said "OK" but the payload did not have the expected shape.
    #[error("unexpected payload: {message}")]
    Decode { message: String },
}

impl Error {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Check if this is the session service telling us the access token expired.
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_invalid_session())
    }
}

/// A rejected login, token refresh, or exam initialisation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoginError {
    /// Message returned by the server, verbatim.
    pub message: String,
}

impl LoginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A non-"OK" reply from an authenticated endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Message returned by the server, verbatim.
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_invalid_session(&self) -> bool {
        self.message == INVALID_SESSION_MESSAGE
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Non-success status with a body that is not a JSON envelope.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The response body could not be decoded as a JSON envelope.
    #[error("invalid response body: {message}")]
    Body { message: String },

    /// The HTTP client could not be built.
    #[error("client initialisation failed: {message}")]
    ClientInit { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Body {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service base URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// The exam access URL could not be parsed.
    #[error("invalid access URL: {reason}")]
    AccessUrl { reason: String },

    /// A required query parameter was absent or empty.
    #[error("missing '{name}' parameter")]
    MissingParameter { name: String },

    /// An identifier that cannot stand as a single URL path segment.
    #[error("invalid path segment '{value}'")]
    PathSegment { value: String },

    /// A value could not be carried in an HTTP header.
    #[error("invalid value for header '{header}'")]
    HeaderValue { header: String },
}
