//! Server-rendered front-end for the GoFinances dashboard.
//!
//! `/` mounts a [`gofinances_core::Dashboard`] per request and renders its
//! settled state; `/import` is the import page. Both share the header with
//! the navigation links.

pub mod config;
pub mod error;
pub mod header;
pub mod pages;
pub mod routes;

pub use routes::{build_router, AppState};
