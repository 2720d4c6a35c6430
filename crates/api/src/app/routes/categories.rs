use std::sync::Arc;

use axum::{Extension, Json, extract::Path};

use lampshop_catalog::{AttributeOption, Category};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn list_categories(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Category>> {
    Json(services.catalog.categories())
}

pub async fn attribute_options(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AttributeOption>>, ApiError> {
    Ok(Json(services.catalog.attribute_options(&id)?))
}
