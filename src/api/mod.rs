//! Demo HTTP API exercising the helper end to end.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
