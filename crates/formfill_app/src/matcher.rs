use std::time::Duration;

use engine_logging::engine_debug;
use formfill_core::{MatchRequest, MatchResponse};
use reqwest::header::CONTENT_TYPE;

use crate::settings::MatcherSettings;

const USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    #[error("invalid matcher endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("matcher did not answer in time")]
    Timeout,
    #[error("matcher responded with HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("could not encode match request: {0}")]
    Encode(String),
    #[error("matcher sent a body that is not a match response: {0}")]
    Decode(String),
}

/// Maps scanned descriptors to values. The round trip only sees this seam.
#[async_trait::async_trait]
pub trait MatchService: Send + Sync {
    async fn request_match(&self, request: &MatchRequest) -> Result<MatchResponse, MatcherError>;
}

/// JSON-over-HTTP client for `POST {endpoint}/autofill`.
#[derive(Debug, Clone)]
pub struct HttpMatcher {
    client: reqwest::Client,
    url: reqwest::Url,
    user_id: String,
}

impl HttpMatcher {
    pub fn new(settings: &MatcherSettings) -> Result<Self, MatcherError> {
        let raw = format!("{}/autofill", settings.endpoint.trim_end_matches('/'));
        let url = reqwest::Url::parse(&raw).map_err(|err| MatcherError::InvalidEndpoint {
            endpoint: settings.endpoint.clone(),
            message: err.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| MatcherError::Network(err.to_string()))?;

        Ok(Self {
            client,
            url,
            user_id: settings.user_id.clone(),
        })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl MatchService for HttpMatcher {
    async fn request_match(&self, request: &MatchRequest) -> Result<MatchResponse, MatcherError> {
        let body = serde_json::to_vec(request).map_err(|err| MatcherError::Encode(err.to_string()))?;
        engine_debug!(
            "POST {} with {} fields ({} bytes)",
            self.url,
            request.fields.len(),
            body.len()
        );

        let response = self
            .client
            .post(self.url.clone())
            .header(USER_HEADER, &self.user_id)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatcherError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&text).map_err(|err| MatcherError::Decode(err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> MatcherError {
    if err.is_timeout() {
        return MatcherError::Timeout;
    }
    MatcherError::Network(err.to_string())
}
