use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::employee::{
    create_employee, delete_employee, get_employee, list_employees, login, update_employee,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let open = Router::new().route("/login", post(login));

    // Employee management is admin-only, enforced here rather than trusted
    // to the client.
    let admin = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route_layer(middleware::from_fn(require_admin));

    open.merge(admin)
}
