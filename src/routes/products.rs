use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::handlers::product::{
    create_product, delete_product, get_product, list_archives, list_products, update_product,
    update_status,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/status", patch(update_status))
        // Read-only historical view of redeemed and sold items
        .route("/archives", get(list_archives))
        .route_layer(middleware::from_fn(require_auth))
}
