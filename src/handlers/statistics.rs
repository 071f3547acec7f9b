// src/handlers/statistics.rs
use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub customers: i64,
    pub employees: i64,
    pub products: i64,
    pub pawned: i64,
    pub for_sale: i64,
    pub redeemed: i64,
    pub sold: i64,
    /// Summed loan value of the currently pawned items.
    pub active_loan_value: f64,
}

// GET /statistics - the dashboard counters
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, AppError> {
    let customers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
        .fetch_one(&state.db_pool)
        .await?;

    let employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(&state.db_pool)
        .await?;

    let by_type = sqlx::query_as::<_, (String, i64)>(
        "SELECT transaction_type, COUNT(*) FROM products GROUP BY transaction_type",
    )
    .fetch_all(&state.db_pool)
    .await?;

    let count_of = |name: &str| {
        by_type
            .iter()
            .find(|(t, _)| t == name)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    let active_loan_value = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(loan_value), 0)::FLOAT8 FROM products WHERE transaction_type = 'pawn'",
    )
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(StatisticsResponse {
        customers,
        employees,
        products: by_type.iter().map(|(_, n)| n).sum(),
        pawned: count_of("pawn"),
        for_sale: count_of("sale"),
        redeemed: count_of("redeemed"),
        sold: count_of("sold"),
        active_loan_value,
    }))
}
