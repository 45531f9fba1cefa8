//! Login credentials type.

use std::fmt;

/// Password login credentials for the session service.
///
/// The identifier is either the student's PSID or their registered mobile
/// number; the service accepts both in the same field.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use myaakash::Credentials;
///
/// let creds = Credentials::new("00001234567", "hunter2");
/// assert_eq!(creds.identifier(), "00001234567");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `identifier` - A PSID or mobile number
    /// * `password` - The account password
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Returns the identifier (PSID or mobile number).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Use this only when constructing the login request.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
