//! HTTP layer for the Product service
//!
//! Axum router, handlers, and the error-to-status mapping. Handlers translate
//! requests into store calls and serialize the results back to JSON; all
//! failures flow through `ServiceError`.

mod errors;
mod routes;
mod server;

pub use errors::{ErrorResponse, ServiceError, ServiceResult};
pub use routes::{routes, AppState};
pub use server::HttpServer;
