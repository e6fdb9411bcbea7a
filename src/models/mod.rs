//! Data model for the Product service
//!
//! The `Product` entity is the service's sole domain object. Validation of
//! client-supplied JSON lives here, next to the type it produces, so that the
//! HTTP layer only ever sees typed results.

mod product;

pub use product::{DataValidationError, Product, ProductDraft};
