//! HTTP API exposing the extraction engine.

pub mod app;
pub mod routes;

pub use app::{AppState, build_router};
