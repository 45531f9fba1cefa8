//! Exam-platform session bound to a one-time access URL.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::api::{
    ApiClient, AttemptQuery, EXAM_ANALYSIS_ANSWER_KEY, EXAM_ANALYSIS_CHAPTER,
    EXAM_ANALYSIS_COMPARATIVE, EXAM_ANALYSIS_OVERALL, EXAM_ATTEMPT, EXAM_INIT, NO_PARAMS, decode,
    field,
};
use crate::auth::sensitive;
use crate::config::ClientConfig;
use crate::error::{Error, InvalidInputError};
use crate::types::ExamProfile;

const TOKEN_PARAM: &str = "token";
const CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");
const DEVICE_ID: HeaderName = HeaderName::from_static("x-device-id");

/// An authenticated session for a single test-taking attempt.
///
/// The session is authenticated by the bearer token embedded in the access URL
/// handed out for the attempt. A value of this type only exists once the
/// exam platform has accepted that token, so every accessor can assume a live
/// session.
///
/// # Example
///
/// ```no_run
/// use myaakash::{ClientConfig, ExamSession};
///
/// # async fn example() -> Result<(), myaakash::Error> {
/// let url = "https://examplatform.aakash.ac.in/?token=eyJhbGciOi...";
/// let exam = ExamSession::connect(url, &ClientConfig::default()).await?;
/// println!("test {}", exam.profile().test_short_code);
///
/// let overall = exam.get_analysis_overall().await?;
/// # Ok(())
/// # }
/// ```
pub struct ExamSession {
    client: ApiClient,
    config: ClientConfig,
    headers: HeaderMap,
    profile: ExamProfile,
}

impl ExamSession {
    /// Start an exam session from an access URL.
    ///
    /// Takes the `token` query parameter as a bearer token, generates fresh
    /// client and device ids, and calls the exam init endpoint.
    ///
    /// # Errors
    ///
    /// - [`InvalidInputError::AccessUrl`] if the URL does not parse
    /// - [`InvalidInputError::MissingParameter`] if it has no `token` parameter
    /// - [`Error::Login`](crate::Error::Login) if the exam platform rejects the token
    #[instrument(skip(access_url, config))]
    pub async fn connect(access_url: &str, config: &ClientConfig) -> Result<Self> {
        info!("Initialising exam session");

        let token = bearer_token(access_url)?;
        let headers = exam_headers(&token)?;
        let client = ApiClient::new(config.http_client()?);

        let url = config.exam_api.endpoint(EXAM_INIT);
        let data = client.get(&url, NO_PARAMS, &headers).await?.into_login()?;
        let profile: ExamProfile = decode(data)?;

        debug!(
            exam_schedule_id = %profile.exam_schedule_id,
            test_id = %profile.test_id,
            "Exam session initialised"
        );

        Ok(Self {
            client,
            config: config.clone(),
            headers,
            profile,
        })
    }

    /// Who is taking which test, as reported by exam init.
    pub fn profile(&self) -> &ExamProfile {
        &self.profile
    }

    #[instrument(skip(self), fields(test_id = %self.profile.test_id))]
    pub async fn get_analysis_overall(&self) -> Result<Value> {
        self.fetch(EXAM_ANALYSIS_OVERALL, NO_PARAMS).await
    }

    /// Attempt state; `consumed_time` asks the platform to include time spent.
    #[instrument(skip(self), fields(test_id = %self.profile.test_id))]
    pub async fn attempt(&self, consumed_time: bool) -> Result<Value> {
        self.fetch(EXAM_ATTEMPT, &AttemptQuery { consumed_time }).await
    }

    #[instrument(skip(self), fields(test_id = %self.profile.test_id))]
    pub async fn get_analysis_answers(&self) -> Result<Value> {
        let data = self.fetch(EXAM_ANALYSIS_ANSWER_KEY, NO_PARAMS).await?;
        field(data, "/answer-key")
    }

    #[instrument(skip(self), fields(test_id = %self.profile.test_id))]
    pub async fn get_analysis_comparative(&self) -> Result<Value> {
        let data = self.fetch(EXAM_ANALYSIS_COMPARATIVE, NO_PARAMS).await?;
        field(data, "/comparative_analysis")
    }

    #[instrument(skip(self), fields(test_id = %self.profile.test_id))]
    pub async fn get_analysis_chapter(&self) -> Result<Value> {
        let data = self.fetch(EXAM_ANALYSIS_CHAPTER, NO_PARAMS).await?;
        field(data, "/chapter_analysis")
    }

    async fn fetch<Q>(&self, path: &str, params: &Q) -> Result<Value>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        let url = self.config.exam_api.endpoint(path);
        self.client
            .get(&url, params, &self.headers)
            .await?
            .into_api()
    }
}

impl std::fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamSession")
            .field("exam_api", &self.config.exam_api)
            .field("profile", &self.profile)
            .field("headers", &"[REDACTED]")
            .finish()
    }
}

/// The first `token` query parameter of an access URL.
fn bearer_token(access_url: &str) -> Result<String> {
    let url = Url::parse(access_url).map_err(|e| InvalidInputError::AccessUrl {
        reason: e.to_string(),
    })?;

    url.query_pairs()
        .find(|(name, _)| name == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            Error::from(InvalidInputError::MissingParameter {
                name: TOKEN_PARAM.to_string(),
            })
        })
}

fn exam_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        sensitive(&format!("Bearer {}", token), "authorization")?,
    );
    headers.insert(CLIENT_ID, sensitive(&Uuid::new_v4().to_string(), "x-client-id")?);
    headers.insert(DEVICE_ID, sensitive(&Uuid::new_v4().to_string(), "x-device-id")?);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_parameter() {
        let token = bearer_token("https://exam.example.com/start?lang=en&token=abc.def.ghi").unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn decodes_percent_encoded_token() {
        let token = bearer_token("https://exam.example.com/?token=a%2Bb%3D").unwrap();
        assert_eq!(token, "a+b=");
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = bearer_token("https://exam.example.com/start?lang=en").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::MissingParameter { ref name }) if name == "token"
        ));

        let err = bearer_token("https://exam.example.com/start?token=").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::MissingParameter { .. })));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = bearer_token("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::AccessUrl { .. })));
    }

    #[test]
    fn headers_use_fresh_ids() {
        let a = exam_headers("tok").unwrap();
        let b = exam_headers("tok").unwrap();

        assert_eq!(a.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_ne!(a.get(&CLIENT_ID), b.get(&CLIENT_ID));
        assert_ne!(a.get(&CLIENT_ID), a.get(&DEVICE_ID));
    }
}
