use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(format!(
                "'{}' is not a valid role (expected admin or employee)",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, FromRow)]
pub struct Employee {
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
    pub created_at: Option<DateTime<Utc>>,
}

/// Row used only by the login flow; the password hash never leaves it.
#[derive(Debug, FromRow)]
pub struct EmployeeCredentials {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password_hash: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_roles() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("employee").unwrap(), Role::Employee);
    }

    #[test]
    fn rejects_anything_else() {
        assert!(Role::parse("manager").is_err());
        assert!(Role::parse("Admin").is_err());
        assert!(Role::parse("").is_err());
    }
}
