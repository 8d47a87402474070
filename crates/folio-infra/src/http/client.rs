//! HTTP client - JSON requests with envelope decoding and error mapping.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use folio_core::ApiError;
use folio_shared::ApiResponse;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// `None` when `FOLIO_API_URL` is unset.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("FOLIO_API_URL").ok()?;
        Some(Self {
            base_url,
            timeout: crate::env::secs_or("FOLIO_REQUEST_TIMEOUT_SECS", 10),
        })
    }
}

pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Network(format!("invalid base url {}: {e}", config.base_url)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Network("base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.client.get(url).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.client.post(url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.client.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "API response");
        decode_envelope(status.as_u16(), status.is_success(), &body)
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::MalformedResponse(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Unwrap `{ success, data, error }`.
///
/// Non-2xx statuses and `success: false` become [`ApiError::Server`] with
/// the server's code and message.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    body: &[u8],
) -> Result<T, ApiError> {
    let envelope: ApiResponse<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if ok => return Err(ApiError::MalformedResponse(e.to_string())),
        Err(_) => {
            return Err(ApiError::Server {
                code: "UNKNOWN_ERROR".to_string(),
                message: format!("Request failed with status {status}"),
                status_code: Some(status),
                details: None,
            });
        }
    };

    if !ok || !envelope.success {
        let (fallback_code, fallback_message) = if ok {
            ("API_ERROR", "API request failed")
        } else {
            ("UNKNOWN_ERROR", "An unknown error occurred")
        };
        let error = envelope.error;
        return Err(ApiError::Server {
            code: error
                .as_ref()
                .map(|e| e.code.clone())
                .unwrap_or_else(|| fallback_code.to_string()),
            message: error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| fallback_message.to_string()),
            status_code: Some(status),
            details: error.and_then(|e| e.details),
        });
    }

    envelope
        .data
        .ok_or_else(|| ApiError::MalformedResponse("response has no data".to_string()))
}
