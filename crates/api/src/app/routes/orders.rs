use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
};

use lampshop_infra::{EntityStore, OrderStatusPatch};
use lampshop_orders::Order;

use crate::app::dto::UpdateStatusRequest;
use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;
use crate::context::AdminContext;

pub async fn list_orders(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Order>> {
    Json(services.orders.list_all())
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(services.orders.get(id)?))
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;

    let updated = services.orders.patch_status(id, req.status)?;
    tracing::info!(order_id = %id, status = %updated.status, by = %admin.subject(), "order status changed");

    // Delivery runs in the background; its outcome never reaches the client.
    let _delivery = services.notifier.notify(updated.id, updated.status);

    Ok(Json(updated))
}
