//! Product HTTP routes
//!
//! Route table and handlers for the eight API operations. Write endpoints
//! read their body as raw bytes so the content-type guard and the field
//! validation decide the status code, not the framework's extractors.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::models::{DataValidationError, Product, ProductDraft};
use crate::store::ProductStore;

use super::errors::{ServiceError, ServiceResult};

// ==================
// Shared State
// ==================

/// Store handle shared across handlers
pub struct AppState {
    pub store: ProductStore,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

/// Listing filters; at most one is ever applied
#[derive(Debug, Deserialize)]
pub struct ListFilters {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
}

/// Liveness probe body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: u16,
    pub message: String,
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Product Demo REST API Service</title></head>
  <body>
    <h1>Product Demo REST API Service</h1>
    <p>The Product resource lives at <code>/products</code>.</p>
  </body>
</html>
"#;

// ==================
// Routes
// ==================

/// Create the product service routes
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/healthcheck", get(health_handler))
        .route("/products", get(list_products_handler))
        .route("/products", post(create_product_handler))
        .route("/products/{id}", get(get_product_handler))
        .route("/products/{id}", put(update_product_handler))
        .route("/products/{id}", delete(delete_product_handler))
        .route("/products/{id}/like", put(like_product_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Reject writes whose Content-Type is missing or not `application/json`.
/// Media-type parameters such as `; charset=utf-8` are tolerated.
fn require_json(headers: &HeaderMap) -> ServiceResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or(ServiceError::UnsupportedMediaType)?;

    let media_type = content_type.split(';').next().unwrap_or("").trim();
    if media_type.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(ServiceError::UnsupportedMediaType)
    }
}

/// Parse a raw write body into JSON; anything unparseable is a bad body.
fn parse_body(body: &Bytes) -> ServiceResult<Value> {
    serde_json::from_slice(body).map_err(|_| DataValidationError::BadBody.into())
}

/// Parse `price_range=<low>_<high>` into an inclusive bound pair.
fn parse_price_range(raw: &str) -> ServiceResult<(i64, i64)> {
    let malformed = || {
        ServiceError::InvalidQueryParam(format!(
            "price_range must be of the form <low>_<high>, got '{raw}'"
        ))
    };

    let (low, high) = raw.split_once('_').ok_or_else(malformed)?;
    let low = low.parse::<i64>().map_err(|_| malformed())?;
    let high = high.parse::<i64>().map_err(|_| malformed())?;
    Ok((low, high))
}

// ==================
// Handlers
// ==================

/// Root URL response
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: 200,
        message: "Healthy".to_string(),
    })
}

/// List products, filtered by at most one of category, name, or price range.
/// Precedence is fixed: category, then name, then price_range, then all.
async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<ListFilters>,
) -> ServiceResult<Json<Vec<Product>>> {
    info!("Request for product list");

    let products = if let Some(category) = filters.category {
        state.store.find_by_category(&category).await?
    } else if let Some(name) = filters.name {
        state.store.find_by_name(&name).await?
    } else if let Some(range) = filters.price_range {
        let (low, high) = parse_price_range(&range)?;
        state.store.find_by_price_range(low, high).await?
    } else {
        state.store.all().await?
    };

    info!("Returning {} products", products.len());
    Ok(Json(products))
}

/// Fetch a single product
async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<Product>> {
    info!("Request for product with id: {}", id);
    let product = state
        .store
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;
    Ok(Json(product))
}

/// Create a product. Any client-supplied id is discarded; the store assigns
/// a fresh one, echoed back in the Location header.
async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ServiceResult<(StatusCode, [(header::HeaderName, String); 1], Json<Product>)> {
    info!("Request to create a product");
    require_json(&headers)?;

    let payload = parse_body(&body)?;
    let draft = ProductDraft::parse(&payload)?;
    let product = state.store.create(draft).await?;

    info!("Product with new id {} created", product.id);
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Replace a product's fields. The path id wins over anything in the body,
/// and the stored like counter is preserved across the update.
async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> ServiceResult<Json<Product>> {
    info!("Request to update product with id: {}", id);
    require_json(&headers)?;

    let existing = state
        .store
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;

    let payload = parse_body(&body)?;
    let draft = ProductDraft::parse(&payload)?;

    let mut product = Product::from_draft(id, draft);
    product.like = existing.like;
    state.store.update(&product).await?;

    Ok(Json(product))
}

/// Delete a product. Deleting an absent id is still success with no effect.
async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServiceResult<StatusCode> {
    info!("Request to delete product with id: {}", id);
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Increment a product's like counter by exactly one.
///
/// Deliberately a plain read-modify-write: concurrent likes may race, which
/// is acceptable for a like counter.
async fn like_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<Product>> {
    info!("Request to like product with id: {}", id);
    let mut product = state
        .store
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;

    product.like += 1;
    state.store.update(&product).await?;

    Ok(Json(product))
}
