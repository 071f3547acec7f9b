// src/dtos/customer.rs
use crate::error::AppError;
use crate::models::customer::{Customer, CustomerListRow};
use crate::search::Searchable;
use crate::validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
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
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::require_non_empty(&self.first_name, "First name")?;
        validation::require_non_empty(&self.last_name, "Last name")?;
        validation::validate_pesel(&self.pesel)?;
        validation::require_non_empty(&self.street, "Street")?;
        validation::require_non_empty(&self.house_number, "House number")?;
        validation::validate_postal_code(&self.postal_code)?;
        validation::require_non_empty(&self.city, "City")?;
        validation::require_non_empty(&self.id_document_series, "Document series")?;
        validation::require_non_empty(&self.id_document_number, "Document number")?;
        if let Some(phone) = &self.phone {
            validation::validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validation::validate_email(email)?;
        }
        Ok(())
    }
}

/// The edit form writes the same fixed field set; anything else in the
/// payload is ignored by deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
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
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::require_non_empty(&self.first_name, "First name")?;
        validation::require_non_empty(&self.last_name, "Last name")?;
        validation::validate_pesel(&self.pesel)?;
        validation::require_non_empty(&self.street, "Street")?;
        validation::require_non_empty(&self.house_number, "House number")?;
        validation::validate_postal_code(&self.postal_code)?;
        validation::require_non_empty(&self.city, "City")?;
        validation::require_non_empty(&self.id_document_series, "Document series")?;
        validation::require_non_empty(&self.id_document_number, "Document number")?;
        if let Some(phone) = &self.phone {
            validation::validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validation::validate_email(email)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
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
    pub created_at: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            pesel: customer.pesel,
            date_of_birth: customer.date_of_birth,
            street: customer.street,
            house_number: customer.house_number,
            postal_code: customer.postal_code,
            city: customer.city,
            id_document_series: customer.id_document_series,
            id_document_number: customer.id_document_number,
            phone: customer.phone,
            email: customer.email,
            notes: customer.notes,
            created_at: customer.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Reduced projection returned by the list endpoint, intentionally not the
/// full record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListItem {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
}

impl From<CustomerListRow> for CustomerListItem {
    fn from(row: CustomerListRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            pesel: row.pesel,
        }
    }
}

impl Searchable for CustomerListRow {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.pesel.clone(),
        ]
    }
}

/// One line per product on the customer detail view.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OwnedProductSummary {
    pub id: i64,
    pub name: String,
    pub transaction_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub products: Vec<OwnedProductSummary>,
}
