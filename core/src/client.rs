//! Request builder and response parser for the transactions API.
//!
//! # Design
//! `TransactionsClient` holds only a `base_url` and carries no mutable state
//! between calls. Listing is split into `build_list_transactions`, which
//! produces an `HttpRequest`, and `parse_list_transactions`, which consumes an
//! `HttpResponse`. `fetch_transactions` glues the two together around an
//! injected [`Transport`].

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::TransactionsResponse;

/// Stateless client for the transactions API.
#[derive(Debug, Clone)]
pub struct TransactionsClient {
    base_url: String,
}

impl TransactionsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_transactions(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/transactions", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn parse_list_transactions(
        &self,
        response: HttpResponse,
    ) -> Result<TransactionsResponse, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Issue `GET {base}/transactions` over `transport` and decode the body.
    ///
    /// No retry: the first failure is returned as is.
    pub async fn fetch_transactions<T: Transport>(
        &self,
        transport: &T,
    ) -> Result<TransactionsResponse, ApiError> {
        let request = self.build_list_transactions();
        tracing::debug!(url = %request.path, "fetching transactions");
        let response = transport.execute(request).await?;
        self.parse_list_transactions(response)
    }
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
