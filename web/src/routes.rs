//! Route paths and the router.

use axum::{routing::get, Router};
use gofinances_core::{TransactionsClient, Transport};
use tower_http::trace::TraceLayer;

use crate::pages::{dashboard_page, import_page, not_found_page};

pub const DASHBOARD: &str = "/";
pub const IMPORT: &str = "/import";

/// What every request needs to reach the transactions API.
#[derive(Debug, Clone)]
pub struct AppState<T> {
    pub client: TransactionsClient,
    pub transport: T,
}

impl<T> AppState<T> {
    pub fn new(client: TransactionsClient, transport: T) -> Self {
        Self { client, transport }
    }
}

pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: Transport + Clone + 'static,
{
    Router::new()
        .route(DASHBOARD, get(dashboard_page::<T>))
        .route(IMPORT, get(import_page))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
