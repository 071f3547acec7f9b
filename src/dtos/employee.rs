// src/dtos/employee.rs
use crate::error::AppError;
use crate::models::employee::{Employee, Role};
use crate::search::Searchable;
use crate::validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
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
    pub phone: String,
    pub email: String,
    pub login: String,
    pub password: String,
    pub role: String,
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> Result<Role, AppError> {
        let role = Role::parse(&self.role).map_err(AppError::validation)?;
        validation::require_non_empty(&self.first_name, "First name")?;
        validation::require_non_empty(&self.last_name, "Last name")?;
        validation::validate_pesel(&self.pesel)?;
        validation::require_non_empty(&self.street, "Street")?;
        validation::require_non_empty(&self.house_number, "House number")?;
        validation::validate_postal_code(&self.postal_code)?;
        validation::require_non_empty(&self.city, "City")?;
        validation::require_non_empty(&self.id_document_series, "Document series")?;
        validation::require_non_empty(&self.id_document_number, "Document number")?;
        validation::validate_phone(&self.phone)?;
        validation::validate_email(&self.email)?;
        validation::require_non_empty(&self.login, "Login")?;
        if self.password.len() < 6 {
            return Err(AppError::validation("Password too short"));
        }
        Ok(role)
    }
}

/// Allow-listed update set; `password` is optional and re-hashed when given.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
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
    pub phone: String,
    pub email: String,
    pub login: String,
    pub password: Option<String>,
    pub role: String,
}

impl UpdateEmployeeRequest {
    pub fn validate(&self) -> Result<Role, AppError> {
        let role = Role::parse(&self.role).map_err(AppError::validation)?;
        validation::require_non_empty(&self.first_name, "First name")?;
        validation::require_non_empty(&self.last_name, "Last name")?;
        validation::validate_pesel(&self.pesel)?;
        validation::require_non_empty(&self.street, "Street")?;
        validation::require_non_empty(&self.house_number, "House number")?;
        validation::validate_postal_code(&self.postal_code)?;
        validation::require_non_empty(&self.city, "City")?;
        validation::require_non_empty(&self.id_document_series, "Document series")?;
        validation::require_non_empty(&self.id_document_number, "Document number")?;
        validation::validate_phone(&self.phone)?;
        validation::validate_email(&self.email)?;
        validation::require_non_empty(&self.login, "Login")?;
        if let Some(password) = &self.password {
            if password.len() < 6 {
                return Err(AppError::validation("Password too short"));
            }
        }
        Ok(role)
    }
}

/// Non-secret projection; the password hash never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
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
    pub phone: String,
    pub email: String,
    pub login: String,
    pub role: String,
    pub created_at: Option<String>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            pesel: employee.pesel,
            date_of_birth: employee.date_of_birth,
            street: employee.street,
            house_number: employee.house_number,
            postal_code: employee.postal_code,
            city: employee.city,
            id_document_series: employee.id_document_series,
            id_document_number: employee.id_document_number,
            phone: employee.phone,
            email: employee.email,
            login: employee.login,
            role: employee.role,
            created_at: employee.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.login.clone(),
            self.pesel.clone(),
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Non-secret subset echoed back on a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEmployee {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: usize,
    pub employee: LoginEmployee,
}
