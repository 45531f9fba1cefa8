//! myaakash - Client for the Aakash learning and exam platform APIs
//!
//! Two independent clients share one transport and error model:
//!
//! - [`AakashSession`] logs a student in with a PSID and password (or a saved
//!   [`TokenBundle`]) and exposes the session, LMS, and content services.
//! - [`ExamSession`] is bound to a single test attempt through the bearer
//!   token embedded in its access URL.
//!
//! Every service replies with a JSON envelope whose `message` is `"OK"` on
//! success. Anything else surfaces as [`Error::Login`] or [`Error::Api`] with
//! the server's message verbatim.
//!
//! # Example
//!
//! ```no_run
//! use myaakash::{AakashSession, ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), myaakash::Error> {
//! let mut session = AakashSession::new(ClientConfig::default())?;
//! session.login(Credentials::new("00001234567", "password")).await?;
//!
//! for package in session.get_packages().await? {
//!     println!("{}", package["package_name"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod exam;
pub mod session;
pub mod types;

mod api;

pub use auth::{AccessToken, Credentials, HeaderSet, RefreshToken, TokenBundle, WebSession};
pub use config::ClientConfig;
pub use error::{ApiError, Error, LoginError};
pub use exam::ExamSession;
pub use session::AakashSession;
pub use types::{ExamProfile, Profile, ServiceUrl, TestStatus};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
