use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};

use lampshop_infra::EntityStore;
use lampshop_products::{Product, ProductDraft};

use crate::app::dto::DeletedResponse;
use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;
use crate::context::AdminContext;

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Product>> {
    Json(services.products.list_all())
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(services.products.get(id)?))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(draft) = body?;
    let created = services.products.create(draft);
    tracing::info!(product_id = %created.id, sku = %created.sku, by = %admin.subject(), "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let Json(draft) = body?;
    let updated = services.products.update(id, draft)?;
    tracing::info!(product_id = %id, by = %admin.subject(), "product updated");
    Ok(Json(updated))
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_id(&id)?;
    services.products.delete(id)?;
    tracing::info!(product_id = %id, by = %admin.subject(), "product deleted");
    Ok(Json(DeletedResponse::new()))
}
