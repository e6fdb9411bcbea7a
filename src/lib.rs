//! product-service - a RESTful microservice for a Product catalog
//!
//! One entity, a relational store, and an axum HTTP layer.

pub mod config;
pub mod models;
pub mod rest_api;
pub mod store;

pub use config::ServiceConfig;
pub use models::{DataValidationError, Product, ProductDraft};
pub use rest_api::{HttpServer, ServiceError};
pub use store::ProductStore;
