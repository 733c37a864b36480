//! redress-server: HTTP API for citizen complaint intake
//!
//! One resource - complaints. Citizens file complaints (POST) and read
//! the list (GET); staff update status or attach a response (PUT).
//! Backed by PostgreSQL through sqlx, served by axum.

pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ApiError, ServerConfig};
