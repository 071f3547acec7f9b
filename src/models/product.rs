use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Transaction state of an item in the shop. `pawn` and `sale` are the live
/// states; `redeemed` and `sold` are terminal and show up only in archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Pawn,
    Sale,
    Redeemed,
    Sold,
}

impl TransactionType {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "pawn" => Ok(TransactionType::Pawn),
            "sale" => Ok(TransactionType::Sale),
            "redeemed" => Ok(TransactionType::Redeemed),
            "sold" => Ok(TransactionType::Sold),
            other => Err(format!(
                "'{}' is not a valid transaction type (expected pawn, sale, redeemed or sold)",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Pawn => "pawn",
            TransactionType::Sale => "sale",
            TransactionType::Redeemed => "redeemed",
            TransactionType::Sold => "sold",
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, TransactionType::Redeemed | TransactionType::Sold)
    }

    /// The only allowed status changes: a pawned item gets redeemed, a sale
    /// item gets sold.
    pub fn can_transition_to(&self, next: TransactionType) -> bool {
        matches!(
            (self, next),
            (TransactionType::Pawn, TransactionType::Redeemed)
                | (TransactionType::Sale, TransactionType::Sold)
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, FromRow)]
pub struct Product {
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
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_enumerated_values() {
        for (s, t) in [
            ("pawn", TransactionType::Pawn),
            ("sale", TransactionType::Sale),
            ("redeemed", TransactionType::Redeemed),
            ("sold", TransactionType::Sold),
        ] {
            assert_eq!(TransactionType::parse(s).unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_value() {
        assert!(TransactionType::parse("loaned").is_err());
        assert!(TransactionType::parse("PAWN").is_err());
        assert!(TransactionType::parse("").is_err());
    }

    #[test]
    fn pawn_goes_to_redeemed_only() {
        let pawn = TransactionType::Pawn;
        assert!(pawn.can_transition_to(TransactionType::Redeemed));
        assert!(!pawn.can_transition_to(TransactionType::Sold));
        assert!(!pawn.can_transition_to(TransactionType::Sale));
        assert!(!pawn.can_transition_to(TransactionType::Pawn));
    }

    #[test]
    fn sale_goes_to_sold_only() {
        let sale = TransactionType::Sale;
        assert!(sale.can_transition_to(TransactionType::Sold));
        assert!(!sale.can_transition_to(TransactionType::Redeemed));
    }

    #[test]
    fn terminal_states_do_not_transition() {
        for t in [TransactionType::Redeemed, TransactionType::Sold] {
            for next in [
                TransactionType::Pawn,
                TransactionType::Sale,
                TransactionType::Redeemed,
                TransactionType::Sold,
            ] {
                assert!(!t.can_transition_to(next));
            }
        }
    }

    #[test]
    fn archive_split() {
        assert!(!TransactionType::Pawn.is_archived());
        assert!(!TransactionType::Sale.is_archived());
        assert!(TransactionType::Redeemed.is_archived());
        assert!(TransactionType::Sold.is_archived());
    }
}
