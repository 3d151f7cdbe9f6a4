//! Error types for fetching and mapping transactions.
//!
//! # Design
//! `ApiError` covers everything that can go wrong between issuing the request
//! and holding a decoded `TransactionsResponse`. `MapError` is per record:
//! one malformed transaction never poisons the rest of the listing.

use thiserror::Error;

/// Errors returned by `TransactionsClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than the expected one.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    TransportError(String),
}

/// A wire record that cannot be turned into a view record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("transaction {id}: invalid value {value:?}")]
    InvalidValue { id: String, value: String },

    #[error("transaction {id}: invalid created_at {created_at:?}")]
    InvalidDate { id: String, created_at: String },

    #[error("balance {field}: cannot format {value}")]
    InvalidBalance { field: &'static str, value: String },
}
