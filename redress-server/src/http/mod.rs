//! HTTP layer
//!
//! JSON in, JSON out. Errors carry their status mapping in `error`;
//! CORS and tracing middleware wrap every route.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig};
