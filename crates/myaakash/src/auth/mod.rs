//! Authentication primitives.
//!
//! Credentials, the token bundle issued by the session service, and the header
//! set derived from it.

mod credentials;
mod headers;
mod tokens;

pub use credentials::Credentials;
pub use headers::HeaderSet;
pub use tokens::{AccessToken, RefreshToken, TokenBundle, WebSession};

pub(crate) use headers::sensitive;
