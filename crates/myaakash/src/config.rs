//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, TransportError};
use crate::types::ServiceUrl;

pub const SESSION_API: &str = "https://session-service.aakash.ac.in/prod/sess/api/v1";
pub const LMS_API: &str = "https://session-service.aakash.ac.in/prod/lms/api/v1";
pub const CHANNEL_V1_API: &str = "https://session-service.aakash.ac.in/prod/channel/api/v1";
pub const CHANNEL_V2_API: &str = "https://session-service.aakash.ac.in/prod/channel/api/v2";
pub const EXAM_PLATFORM_API: &str =
    "https://examplatform-api.aakash.ac.in/prod/exam-platform/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Service locations and transport settings shared by both clients.
///
/// The defaults point at the production services. Every field can be
/// overridden, which is how tests aim the clients at a mock server.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use myaakash::{ClientConfig, ServiceUrl};
///
/// # fn example() -> Result<(), myaakash::Error> {
/// let config = ClientConfig::default()
///     .with_lms_api(ServiceUrl::new("http://localhost:8080/lms")?)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub session_api: ServiceUrl,
    pub lms_api: ServiceUrl,
    pub channel_v1_api: ServiceUrl,
    pub channel_v2_api: ServiceUrl,
    pub exam_api: ServiceUrl,
    /// Total time allowed for a single request.
    #[serde(with = "seconds")]
    pub timeout: Duration,
    /// Time allowed to establish a connection, if tighter than `timeout`.
    #[serde(with = "opt_seconds")]
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_api: production(SESSION_API),
            lms_api: production(LMS_API),
            channel_v1_api: production(CHANNEL_V1_API),
            channel_v2_api: production(CHANNEL_V2_API),
            exam_api: production(EXAM_PLATFORM_API),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_session_api(mut self, url: ServiceUrl) -> Self {
        self.session_api = url;
        self
    }

    pub fn with_lms_api(mut self, url: ServiceUrl) -> Self {
        self.lms_api = url;
        self
    }

    pub fn with_channel_apis(mut self, v1: ServiceUrl, v2: ServiceUrl) -> Self {
        self.channel_v1_api = v1;
        self.channel_v2_api = v2;
        self
    }

    pub fn with_exam_api(mut self, url: ServiceUrl) -> Self {
        self.exam_api = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build a `reqwest` client honouring the configured timeouts.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("myaakash/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout);

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        builder.build().map_err(|e| {
            Error::from(TransportError::ClientInit {
                message: e.to_string(),
            })
        })
    }
}

// The production constants are known-good literals.
fn production(url: &str) -> ServiceUrl {
    ServiceUrl::new(url).unwrap_or_else(|e| panic!("invalid built-in URL {url}: {e}"))
}

// Timeouts are stored as (possibly fractional) seconds; zero is refused
// because reqwest would then fail every request immediately.
mod seconds {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        parse(f64::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    pub(super) fn parse(secs: f64) -> Result<Duration, String> {
        let duration = Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())?;
        if duration.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(duration)
    }
}

mod opt_seconds {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(super::seconds::parse)
            .transpose()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.session_api.host(), Some("session-service.aakash.ac.in"));
        assert_eq!(config.exam_api.host(), Some("examplatform-api.aakash.ac.in"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "lms_api": "http://localhost:9000/lms",
            "timeout": 5
        }))
        .unwrap();

        assert_eq!(config.lms_api.as_str(), "http://localhost:9000/lms");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.session_api, ClientConfig::default().session_api);
    }

    #[test]
    fn config_rejects_insecure_remote_url() {
        let result: Result<ClientConfig, _> = serde_json::from_value(json!({
            "session_api": "http://session-service.aakash.ac.in/prod/sess/api/v1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn builtin_urls_are_valid() {
        for url in [
            SESSION_API,
            LMS_API,
            CHANNEL_V1_API,
            CHANNEL_V2_API,
            EXAM_PLATFORM_API,
        ] {
            assert!(ServiceUrl::new(url).is_ok(), "{url}");
        }

        let config = ClientConfig::default();
        assert_eq!(config.lms_api.as_str(), LMS_API);
        assert_eq!(config.channel_v1_api.as_str(), CHANNEL_V1_API);
        assert_eq!(config.channel_v2_api.as_str(), CHANNEL_V2_API);
    }

    #[test]
    fn sub_second_timeouts_survive_a_save_and_load() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_millis(500))
            .with_connect_timeout(Duration::from_millis(250));

        let saved = serde_json::to_string(&config).unwrap();
        let loaded: ClientConfig = serde_json::from_str(&saved).unwrap();

        assert_eq!(loaded.timeout, Duration::from_millis(500));
        assert_eq!(loaded.connect_timeout, Some(Duration::from_millis(250)));
        assert_eq!(loaded, config);
    }

    #[test]
    fn zero_or_negative_timeout_is_rejected() {
        for timeout in [json!(0), json!(0.0), json!(-1)] {
            let result: Result<ClientConfig, _> =
                serde_json::from_value(json!({ "timeout": timeout }));
            assert!(result.is_err(), "{timeout}");
        }

        let result: Result<ClientConfig, _> =
            serde_json::from_value(json!({ "connect_timeout": 0 }));
        assert!(result.is_err());
    }

    #[test]
    fn http_client_builds_with_timeouts() {
        let config = ClientConfig::default().with_connect_timeout(Duration::from_secs(2));
        assert!(config.http_client().is_ok());
    }
}
