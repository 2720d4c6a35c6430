use axum::{
    Router,
    routing::{get, post, put},
};

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod system;

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/categories", get(categories::list_categories))
        .route("/categories/:id/attributes", get(categories::attribute_options))
}

/// Router for all authenticated endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/orders", get(orders::list_orders))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", put(orders::update_order_status))
}
