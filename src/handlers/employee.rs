// src/handlers/employee.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde_json::json;
use tracing::instrument;

use crate::auth::jwt::{sign_token, SESSION_HOURS};
use crate::dtos::employee::{
    CreateEmployeeRequest, EmployeeResponse, LoginEmployee, LoginRequest, LoginResponse,
    UpdateEmployeeRequest,
};
use crate::error::{map_unique_violation, AppError};
use crate::models::employee::{Employee, EmployeeCredentials};
use crate::pagination::{paginate, ListParams, Paginated};
use crate::search;
use crate::state::AppState;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, pesel, date_of_birth, street, \
     house_number, postal_code, city, id_document_series, id_document_number, phone, email, \
     login, role, created_at";

const UNIQUE_MESSAGE: &str =
    "An employee with this pesel, identity document, email or login already exists";

// GET /employees
#[instrument(skip(state, params))]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<EmployeeResponse>>, AppError> {
    let rows = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY last_name, first_name"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    let filtered = search::filter(rows, params.search.as_deref());
    let page = paginate(filtered, params.page, params.per_page);

    Ok(Json(page.map(EmployeeResponse::from)))
}

// GET /employees/:id
#[instrument(skip(state), fields(id))]
pub async fn get_employee(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Employee not found"))?;

    Ok(Json(EmployeeResponse::from(employee)))
}

// POST /employees - admin only (enforced by the route layer)
#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let role = payload.validate()?;

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let employee = sqlx::query_as::<_, Employee>(&format!(
        "INSERT INTO employees (first_name, last_name, pesel, date_of_birth, street, \
         house_number, postal_code, city, id_document_series, id_document_number, phone, \
         email, login, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING {EMPLOYEE_COLUMNS}"
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
    .bind(&payload.login)
    .bind(&password_hash)
    .bind(role.as_str())
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, UNIQUE_MESSAGE))?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

// PUT /employees/:id - allow-listed update; password re-hashed only when sent
#[instrument(skip(state, payload), fields(id))]
pub async fn update_employee(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let role = payload.validate()?;

    let password_hash = payload
        .password
        .as_deref()
        .map(|p| hash(p, DEFAULT_COST))
        .transpose()
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let employee = sqlx::query_as::<_, Employee>(&format!(
        "UPDATE employees SET first_name = $1, last_name = $2, pesel = $3, date_of_birth = $4, \
         street = $5, house_number = $6, postal_code = $7, city = $8, id_document_series = $9, \
         id_document_number = $10, phone = $11, email = $12, login = $13, \
         password_hash = COALESCE($14, password_hash), role = $15 \
         WHERE id = $16 RETURNING {EMPLOYEE_COLUMNS}"
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
    .bind(&payload.login)
    .bind(&password_hash)
    .bind(role.as_str())
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, UNIQUE_MESSAGE))?
    .ok_or_else(|| AppError::not_found("Employee not found"))?;

    Ok(Json(EmployeeResponse::from(employee)))
}

// DELETE /employees/:id
#[instrument(skip(state), fields(id))]
pub async fn delete_employee(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!(
            "Employee with id {} does not exist",
            id
        )));
    }

    Ok(Json(json!({ "message": "Employee deleted" })))
}

// POST /login - open route; unknown login and wrong password are
// indistinguishable to the caller
#[instrument(skip(state, payload), fields(login = %payload.login))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.login.trim().is_empty() {
        return Err(AppError::validation("Login required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let employee = sqlx::query_as::<_, EmployeeCredentials>(
        "SELECT id, first_name, last_name, login, password_hash, role \
         FROM employees WHERE login = $1",
    )
    .bind(&payload.login)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid login or password"))?;

    let ok = verify(&payload.password, &employee.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::unauthorized("Invalid login or password"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(employee.id, &employee.role, &employee.login, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        // 9 hours = 32400 seconds
        expires_in_seconds: (SESSION_HOURS * 3600) as usize,
        employee: LoginEmployee {
            first_name: employee.first_name,
            last_name: employee.last_name,
            login: employee.login,
            role: employee.role,
        },
    }))
}
