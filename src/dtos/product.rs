// src/dtos/product.rs
use crate::dtos::customer::CustomerListItem;
use crate::error::AppError;
use crate::models::product::{Product, TransactionType};
use crate::search::Searchable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text fields of the add/edit product form. The form arrives as multipart
/// (the image files ride along), so this is parsed from the collected text
/// parts rather than a JSON body.
#[derive(Debug)]
pub struct ProductForm {
    pub client_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub production_year: Option<i32>,
    pub technical_condition: String,
    pub purchase_price: f64,
    pub sale_price: Option<f64>,
    pub additional_notes: Option<String>,
    pub transaction_type: TransactionType,
    pub receipt_date: NaiveDate,
    pub redemption_deadline: Option<NaiveDate>,
    pub loan_value: Option<f64>,
    pub interest_rate: Option<f64>,
    pub transaction_notes: Option<String>,
}

fn required<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str, AppError> {
    fields
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(format!("{} is required", name)))
}

fn optional<'a>(fields: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, AppError> {
    value
        .parse::<T>()
        .map_err(|_| AppError::validation(format!("{} is not a valid number", name)))
}

fn parse_date(value: &str, name: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{} is not a valid date (expected YYYY-MM-DD)", name)))
}

impl ProductForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let client_id = parse_number::<i64>(required(fields, "clientId")?, "clientId")?;
        let transaction_type = TransactionType::parse(required(fields, "transactionType")?)
            .map_err(AppError::validation)?;
        let purchase_price =
            parse_number::<f64>(required(fields, "purchasePrice")?, "purchasePrice")?;
        if purchase_price < 0.0 {
            return Err(AppError::validation("purchasePrice cannot be negative"));
        }

        let form = Self {
            client_id,
            name: required(fields, "name")?.to_string(),
            description: required(fields, "description")?.to_string(),
            category: required(fields, "category")?.to_string(),
            brand: optional(fields, "brand").map(str::to_string),
            model: optional(fields, "model").map(str::to_string),
            serial_number: optional(fields, "serialNumber").map(str::to_string),
            production_year: optional(fields, "productionYear")
                .map(|v| parse_number::<i32>(v, "productionYear"))
                .transpose()?,
            technical_condition: required(fields, "technicalCondition")?.to_string(),
            purchase_price,
            sale_price: optional(fields, "salePrice")
                .map(|v| parse_number::<f64>(v, "salePrice"))
                .transpose()?,
            additional_notes: optional(fields, "additionalNotes").map(str::to_string),
            transaction_type,
            receipt_date: parse_date(required(fields, "receiptDate")?, "receiptDate")?,
            redemption_deadline: optional(fields, "redemptionDeadline")
                .map(|v| parse_date(v, "redemptionDeadline"))
                .transpose()?,
            loan_value: optional(fields, "loanValue")
                .map(|v| parse_number::<f64>(v, "loanValue"))
                .transpose()?,
            interest_rate: optional(fields, "interestRate")
                .map(|v| parse_number::<f64>(v, "interestRate"))
                .transpose()?,
            transaction_notes: optional(fields, "transactionNotes").map(str::to_string),
        };

        Ok(form)
    }
}

/// Body of the status-change action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub transaction_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub production_year: Option<i32>,
    pub technical_condition: String,
    pub purchase_price: f64,
    pub sale_price: Option<f64>,
    pub images: Vec<String>,
    pub additional_notes: Option<String>,
    pub transaction_type: String,
    pub receipt_date: NaiveDate,
    pub redemption_deadline: Option<NaiveDate>,
    pub loan_value: Option<f64>,
    pub interest_rate: Option<f64>,
    pub transaction_notes: Option<String>,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerListItem>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            client_id: product.client_id,
            name: product.name,
            description: product.description,
            category: product.category,
            brand: product.brand,
            model: product.model,
            serial_number: product.serial_number,
            production_year: product.production_year,
            technical_condition: product.technical_condition,
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
            images: product.images,
            additional_notes: product.additional_notes,
            transaction_type: product.transaction_type,
            receipt_date: product.receipt_date,
            redemption_deadline: product.redemption_deadline,
            loan_value: product.loan_value,
            interest_rate: product.interest_rate,
            transaction_notes: product.transaction_notes,
            created_at: product.created_at.map(|dt| dt.to_rfc3339()),
            customer: None,
        }
    }
}

impl ProductResponse {
    pub fn with_customer(mut self, customer: CustomerListItem) -> Self {
        self.customer = Some(customer);
        self
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.category.clone()];
        if let Some(brand) = &self.brand {
            fields.push(brand.clone());
        }
        if let Some(serial_number) = &self.serial_number {
            fields.push(serial_number.clone());
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for (k, v) in [
            ("clientId", "1"),
            ("name", "Gold ring"),
            ("description", "585 gold, 3.2g"),
            ("category", "jewelry"),
            ("technicalCondition", "good"),
            ("purchasePrice", "450.00"),
            ("transactionType", "pawn"),
            ("receiptDate", "2024-03-01"),
        ] {
            fields.insert(k.to_string(), v.to_string());
        }
        fields
    }

    #[test]
    fn parses_a_minimal_form() {
        let form = ProductForm::from_fields(&base_fields()).unwrap();
        assert_eq!(form.client_id, 1);
        assert_eq!(form.transaction_type, TransactionType::Pawn);
        assert_eq!(form.purchase_price, 450.0);
        assert!(form.brand.is_none());
        assert!(form.redemption_deadline.is_none());
    }

    #[test]
    fn missing_client_reference_is_rejected() {
        let mut fields = base_fields();
        fields.remove("clientId");
        let err = ProductForm::from_fields(&fields).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn empty_optional_fields_become_none() {
        let mut fields = base_fields();
        fields.insert("brand".into(), "".into());
        fields.insert("salePrice".into(), "  ".into());
        let form = ProductForm::from_fields(&fields).unwrap();
        assert!(form.brand.is_none());
        assert!(form.sale_price.is_none());
    }

    #[test]
    fn bad_transaction_type_is_rejected() {
        let mut fields = base_fields();
        fields.insert("transactionType".into(), "loan".into());
        assert!(ProductForm::from_fields(&fields).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut fields = base_fields();
        fields.insert("receiptDate".into(), "01.03.2024".into());
        assert!(ProductForm::from_fields(&fields).is_err());
    }

    #[test]
    fn optional_numbers_are_parsed() {
        let mut fields = base_fields();
        fields.insert("loanValue".into(), "300".into());
        fields.insert("interestRate".into(), "2.5".into());
        fields.insert("productionYear".into(), "2019".into());
        let form = ProductForm::from_fields(&fields).unwrap();
        assert_eq!(form.loan_value, Some(300.0));
        assert_eq!(form.interest_rate, Some(2.5));
        assert_eq!(form.production_year, Some(2019));
    }
}
