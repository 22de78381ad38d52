//! HTTP server layer.

pub mod http;

pub use http::{AppState, create_router};
