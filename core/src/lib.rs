//! API client and view models for the GoFinances dashboard.
//!
//! # Overview
//! Fetches the transaction listing from the finances API, maps the wire
//! records into display records (Brazilian Real amounts, `DD/MM/YYYY` dates)
//! and drives the dashboard's fetch-on-mount state.
//!
//! # Design
//! - `TransactionsClient` is stateless and holds only `base_url`. It builds a
//!   plain-data `HttpRequest` and parses an `HttpResponse`; an injected
//!   `Transport` performs the round-trip.
//! - The mapper is pure and reports malformed records as `MapError` values.
//! - `Dashboard` owns a cancellable fetch task and a `watch` channel with the
//!   view state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod http;
pub mod mapper;
pub mod transport;
pub mod types;

pub use client::TransactionsClient;
pub use dashboard::{Dashboard, DashboardState, SummaryCards, TableRow};
pub use error::{ApiError, MapError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mapper::{to_balance_view, to_transaction_view, BalanceView, TransactionView};
pub use transport::{ReqwestTransport, Transport};
pub use types::{BalanceWire, CategoryWire, TransactionKind, TransactionWire, TransactionsResponse};
