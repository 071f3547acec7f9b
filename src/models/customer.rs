use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
    pub date_of_birth: NaiveDate,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub id_document_series: String,
    pub id_document_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Reduced projection returned by the customer list endpoint.
#[derive(Debug, FromRow)]
pub struct CustomerListRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
}
