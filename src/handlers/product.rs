// src/handlers/product.rs
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use tracing::instrument;

use crate::dtos::customer::CustomerListItem;
use crate::dtos::product::{ProductForm, ProductResponse, UpdateStatusRequest};
use crate::error::AppError;
use crate::models::customer::CustomerListRow;
use crate::models::product::{Product, TransactionType};
use crate::pagination::{paginate, ListParams, Paginated};
use crate::search;
use crate::state::AppState;
use crate::storage;

const PRODUCT_COLUMNS: &str = "id, client_id, name, description, category, brand, model, \
     serial_number, production_year, technical_condition, \
     purchase_price::FLOAT8 AS purchase_price, sale_price::FLOAT8 AS sale_price, images, \
     additional_notes, transaction_type, receipt_date, redemption_deadline, \
     loan_value::FLOAT8 AS loan_value, interest_rate, transaction_notes, created_at";

/// Splits the multipart form into its text fields and the repeated `images`
/// file parts.
async fn collect_form(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Vec<(String, Vec<u8>)>), AppError> {
    let mut fields = HashMap::new();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::validation("Image part is missing a filename"))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            images.push((file_name, data.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, images))
}

async fn fetch_owner(
    state: &AppState,
    client_id: i64,
) -> Result<CustomerListItem, AppError> {
    let row = sqlx::query_as::<_, CustomerListRow>(
        "SELECT id, first_name, last_name, pesel FROM customers WHERE id = $1",
    )
    .bind(client_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(CustomerListItem::from(row))
}

async fn list_by_types(
    state: &AppState,
    params: &ListParams,
    types: &[&str],
) -> Result<Paginated<ProductResponse>, AppError> {
    let rows = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE transaction_type = ANY($1) ORDER BY id"
    ))
    .bind(types.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    .fetch_all(&state.db_pool)
    .await?;

    let filtered = search::filter(rows, params.search.as_deref());
    let page = paginate(filtered, params.page, params.per_page);

    Ok(page.map(ProductResponse::from))
}

// GET /products - the live set (pawned and for-sale items)
#[instrument(skip(state, params))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<ProductResponse>>, AppError> {
    Ok(Json(list_by_types(&state, &params, &["pawn", "sale"]).await?))
}

// GET /archives - the read-only historical set (redeemed and sold items)
#[instrument(skip(state, params))]
pub async fn list_archives(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<ProductResponse>>, AppError> {
    Ok(Json(
        list_by_types(&state, &params, &["redeemed", "sold"]).await?,
    ))
}

// GET /products/:id - full record plus the owning customer
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    let owner = fetch_owner(&state, product.client_id).await?;
    Ok(Json(ProductResponse::from(product).with_customer(owner)))
}

// POST /products - multipart: text fields plus repeated `images` file parts
#[instrument(skip(state, multipart))]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let (fields, image_parts) = collect_form(multipart).await?;
    let form = ProductForm::from_fields(&fields)?;

    // The client reference must resolve before anything is written.
    let owner = fetch_owner(&state, form.client_id).await?;

    let mut filenames = Vec::with_capacity(image_parts.len());
    for (original_name, data) in &image_parts {
        filenames.push(storage::save_image(&state.upload_dir, original_name, data)?);
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (client_id, name, description, category, brand, model, \
         serial_number, production_year, technical_condition, purchase_price, sale_price, \
         images, additional_notes, transaction_type, receipt_date, redemption_deadline, \
         loan_value, interest_rate, transaction_notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(form.client_id)
    .bind(&form.name)
    .bind(&form.description)
    .bind(&form.category)
    .bind(&form.brand)
    .bind(&form.model)
    .bind(&form.serial_number)
    .bind(form.production_year)
    .bind(&form.technical_condition)
    .bind(form.purchase_price)
    .bind(form.sale_price)
    .bind(&filenames)
    .bind(&form.additional_notes)
    .bind(form.transaction_type.as_str())
    .bind(form.receipt_date)
    .bind(form.redemption_deadline)
    .bind(form.loan_value)
    .bind(form.interest_rate)
    .bind(&form.transaction_notes)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::from(product).with_customer(owner)),
    ))
}

// PUT /products/:id - multipart full-field update; new images replace the
// stored set, a transactionType change must follow the transition rules
#[instrument(skip(state, multipart), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProductResponse>, AppError> {
    let (fields, image_parts) = collect_form(multipart).await?;
    let form = ProductForm::from_fields(&fields)?;

    let existing = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    let current = TransactionType::parse(&existing.transaction_type)
        .map_err(AppError::internal)?;
    if form.transaction_type != current && !current.can_transition_to(form.transaction_type) {
        return Err(AppError::validation(format!(
            "Cannot change transaction type from {} to {}",
            current, form.transaction_type
        )));
    }

    let owner = fetch_owner(&state, form.client_id).await?;

    let filenames = if image_parts.is_empty() {
        existing.images.clone()
    } else {
        let mut stored = Vec::with_capacity(image_parts.len());
        for (original_name, data) in &image_parts {
            stored.push(storage::save_image(&state.upload_dir, original_name, data)?);
        }
        stored
    };

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET client_id = $1, name = $2, description = $3, category = $4, \
         brand = $5, model = $6, serial_number = $7, production_year = $8, \
         technical_condition = $9, purchase_price = $10, sale_price = $11, images = $12, \
         additional_notes = $13, transaction_type = $14, receipt_date = $15, \
         redemption_deadline = $16, loan_value = $17, interest_rate = $18, \
         transaction_notes = $19 WHERE id = $20 RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(form.client_id)
    .bind(&form.name)
    .bind(&form.description)
    .bind(&form.category)
    .bind(&form.brand)
    .bind(&form.model)
    .bind(&form.serial_number)
    .bind(form.production_year)
    .bind(&form.technical_condition)
    .bind(form.purchase_price)
    .bind(form.sale_price)
    .bind(&filenames)
    .bind(&form.additional_notes)
    .bind(form.transaction_type.as_str())
    .bind(form.receipt_date)
    .bind(form.redemption_deadline)
    .bind(form.loan_value)
    .bind(form.interest_rate)
    .bind(&form.transaction_notes)
    .bind(id)
    .fetch_one(&state.db_pool)
    .await?;

    // The row now points at the new set; drop the replaced files.
    if !image_parts.is_empty() {
        storage::remove_images(&state.upload_dir, &existing.images);
    }

    Ok(Json(ProductResponse::from(product).with_customer(owner)))
}

// PATCH /products/:id/status - the status-change action: pawn -> redeemed,
// sale -> sold, nothing else
#[instrument(skip(state, payload), fields(id))]
pub async fn update_status(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let next = TransactionType::parse(&payload.transaction_type)
        .map_err(AppError::validation)?;

    let current_str = sqlx::query_scalar::<_, String>(
        "SELECT transaction_type FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    let current = TransactionType::parse(&current_str).map_err(AppError::internal)?;
    if !current.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Cannot change transaction type from {} to {}",
            current, next
        )));
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET transaction_type = $1 WHERE id = $2 RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(next.as_str())
    .bind(id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let images = sqlx::query_scalar::<_, Vec<String>>(
        "SELECT images FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| {
        AppError::not_found(format!("Product with id {} does not exist", id))
    })?;

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    storage::remove_images(&state.upload_dir, &images);

    Ok(Json(json!({ "message": "Product deleted" })))
}
