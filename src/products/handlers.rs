use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    error::ApiError,
    products::{
        dto::{
            CreateProductRequest, DeleteProductResponse, ListProductsQuery, RateProductRequest,
            UpdateProductRequest,
        },
        repo_types::Product,
        services::next_rating,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/products/:id/ratings", post(rate_product))
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = Product::list(&state.db, &params).await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    match Product::find(&state.db, id).await? {
        Some(p) => Ok(Json(p)),
        None => Err(ApiError::NotFound("product not found".into())),
    }
}

#[instrument(skip(state, _claims, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if payload.name.trim().is_empty() || payload.category.trim().is_empty() {
        warn!("product with missing fields");
        return Err(ApiError::Validation("name and category are required".into()));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(ApiError::Validation("price must be non-negative".into()));
    }

    let product = Product::insert(
        &state.db,
        payload.name.trim(),
        &payload.description,
        payload.price,
        payload.category.trim(),
        payload.image.as_deref().unwrap_or(""),
    )
    .await?;

    info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, _claims, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    if let Some(price) = payload.price {
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::Validation("price must be non-negative".into()));
        }
    }

    let updated = Product::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.price,
        payload.category.as_deref(),
        payload.image.as_deref(),
    )
    .await?;

    match updated {
        Some(p) => {
            info!(product_id = %p.id, "product updated");
            Ok(Json(p))
        }
        None => Err(ApiError::NotFound("product not found".into())),
    }
}

#[instrument(skip(state, _claims))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    if !Product::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("product not found".into()));
    }
    info!(product_id = %id, "product deleted");
    Ok(Json(DeleteProductResponse {
        message: "product removed".into(),
    }))
}

#[instrument(skip(state, _claims, payload))]
pub async fn rate_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    if !payload.rating.is_finite() || !(1.0..=5.0).contains(&payload.rating) {
        return Err(ApiError::Validation("rating must be between 1 and 5".into()));
    }

    let product = Product::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".into()))?;

    let rating = next_rating(product.rating, product.num_reviews, payload.rating);
    let updated = Product::set_rating(&state.db, id, rating, product.num_reviews + 1)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".into()))?;

    info!(product_id = %id, rating = updated.rating, num_reviews = updated.num_reviews, "rating recorded");
    Ok(Json(updated))
}
