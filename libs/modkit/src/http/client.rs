//! Thin wrapper around `reqwest::Client` that opens an `outgoing_http` span
//! per request and decodes JSON bodies.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{field::Empty, Instrument, Level};

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `body` is kept raw so callers can parse problem details.
    #[error("unexpected status {status}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[derive(Clone)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = Empty,
            error = Empty,
        );

        async {
            let response = self.inner.execute(req).await?;
            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());
            if status.is_client_error() || status.is_server_error() {
                tracing::Span::current().record("error", true);
            }
            Ok(response)
        }
        .instrument(span)
        .await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpClientError> {
        let req = self.inner.get(url).build()?;
        Self::decode(self.execute(req).await?).await
    }

    pub async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
    ) -> Result<T, HttpClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.inner.request(method, url).json(body).build()?;
        Self::decode(self.execute(req).await?).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, HttpClientError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(HttpClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
