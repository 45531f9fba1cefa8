//! HTTP client for the platform's JSON services.

use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::Error;

use super::envelope::Reply;

/// Thin wrapper over `reqwest` that decodes every reply into a [`Reply`].
///
/// Callers pass absolute endpoint URLs and the header set for the call; the
/// client holds no session state of its own.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET with query parameters.
    #[instrument(skip(self, headers))]
    pub async fn get<Q>(&self, url: &str, params: &Q, headers: &HeaderMap) -> Result<Reply, Error>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        debug!("GET");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(url)
            .query(params)
            .headers(headers.clone())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// POST with a JSON body.
    #[instrument(skip(self, body, headers))]
    pub async fn post<B>(&self, url: &str, body: &B, headers: &HeaderMap) -> Result<Reply, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .headers(headers.clone())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// POST with no request body.
    #[instrument(skip(self, headers))]
    pub async fn post_empty(&self, url: &str, headers: &HeaderMap) -> Result<Reply, Error> {
        debug!("POST (no body)");

        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// PUT with a JSON body.
    #[instrument(skip(self, body, headers))]
    pub async fn put<B>(&self, url: &str, body: &B, headers: &HeaderMap) -> Result<Reply, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!("PUT");

        let response = self
            .client
            .put(url)
            .json(body)
            .headers(headers.clone())
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Reply, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        let body = response.bytes().await?;
        Reply::decode(status, &body)
    }
}
