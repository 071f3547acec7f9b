// src/handlers/customer.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::dtos::customer::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListItem, CustomerResponse,
    OwnedProductSummary, UpdateCustomerRequest,
};
use crate::error::{map_foreign_key_violation, map_unique_violation, AppError};
use crate::models::customer::{Customer, CustomerListRow};
use crate::pagination::{paginate, ListParams, Paginated};
use crate::search;
use crate::state::AppState;

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, pesel, date_of_birth, street, \
     house_number, postal_code, city, id_document_series, id_document_number, phone, email, \
     notes, created_at";

// GET /customers - reduced projection with search + pagination
#[instrument(skip(state, params))]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<CustomerListItem>>, AppError> {
    let rows = sqlx::query_as::<_, CustomerListRow>(
        "SELECT id, first_name, last_name, pesel FROM customers ORDER BY last_name, first_name",
    )
    .fetch_all(&state.db_pool)
    .await?;

    let filtered = search::filter(rows, params.search.as_deref());
    let page = paginate(filtered, params.page, params.per_page);

    Ok(Json(page.map(CustomerListItem::from)))
}

// GET /customers/:id - full record plus a summary of the customer's products
#[instrument(skip(state), fields(id))]
pub async fn get_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    let products = sqlx::query_as::<_, OwnedProductSummary>(
        "SELECT id, name, transaction_type FROM products WHERE client_id = $1 ORDER BY id",
    )
    .bind(id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(CustomerDetailResponse {
        customer: CustomerResponse::from(customer),
        products,
    }))
}

// POST /customers - Register a new customer
#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    payload.validate()?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "INSERT INTO customers (first_name, last_name, pesel, date_of_birth, street, house_number, \
         postal_code, city, id_document_series, id_document_number, phone, email, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.pesel)
    .bind(payload.date_of_birth)
    .bind(&payload.street)
    .bind(&payload.house_number)
    .bind(&payload.postal_code)
    .bind(&payload.city)
    .bind(&payload.id_document_series)
    .bind(&payload.id_document_number)
    .bind(&payload.phone)
    .bind(&payload.email)
    .bind(&payload.notes)
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A customer with this pesel or identity document already exists"))?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

// PUT /customers/:id - allow-listed field update
#[instrument(skip(state, payload), fields(id))]
pub async fn update_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    payload.validate()?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers SET first_name = $1, last_name = $2, pesel = $3, date_of_birth = $4, \
         street = $5, house_number = $6, postal_code = $7, city = $8, id_document_series = $9, \
         id_document_number = $10, phone = $11, email = $12, notes = $13 \
         WHERE id = $14 RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.pesel)
    .bind(payload.date_of_birth)
    .bind(&payload.street)
    .bind(&payload.house_number)
    .bind(&payload.postal_code)
    .bind(&payload.city)
    .bind(&payload.id_document_series)
    .bind(&payload.id_document_number)
    .bind(&payload.phone)
    .bind(&payload.email)
    .bind(&payload.notes)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A customer with this pesel or identity document already exists"))?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(CustomerResponse::from(customer)))
}

// DELETE /customers/:id - blocked while products still reference the customer
#[instrument(skip(state), fields(id))]
pub async fn delete_customer(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, "Customer has products on file and cannot be deleted")
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!(
            "Customer with id {} does not exist",
            id
        )));
    }

    Ok(Json(json!({ "message": "Customer deleted" })))
}
