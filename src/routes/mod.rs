pub mod customers;
pub mod employees;
pub mod products;

use axum::{middleware, routing::get, Router};

use crate::handlers::statistics;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    let stats = Router::new()
        .route("/statistics", get(statistics::get_statistics))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .merge(customers::routes())
        .merge(products::routes())
        .merge(employees::routes())
        .merge(stats)
}
