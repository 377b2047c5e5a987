//! HTTP API module: member CRUD, index, health, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, create_router_with, RouterOptions};
