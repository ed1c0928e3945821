//! Keep-alive HTTP API exposing health and history statistics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
