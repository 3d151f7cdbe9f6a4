//! Executes plain-data requests against the network.
//!
//! `TransactionsClient` never talks to the network itself; it hands an
//! `HttpRequest` to a `Transport` and parses whatever comes back. Production
//! code uses [`ReqwestTransport`]; tests plug in canned responses.

use std::future::Future;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Non-2xx statuses are returned as data, not as errors, so the client can
/// interpret them. Only failures that yield no response at all map to
/// `ApiError::TransportError`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.http.get(&request.path),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::TransportError(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::TransportError(e.to_string()))?;

            tracing::trace!(
                method = request.method.as_str(),
                url = %request.path,
                status,
                "request completed"
            );
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
