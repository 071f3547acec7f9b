// src/validation.rs
//
// Field format checks the forms used to run in the browser; the service
// enforces them before any write so a bad payload never reaches the database.
use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static PESEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{11}$").unwrap());

static POSTAL_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}-\d{3}$").unwrap());

/// Pesel is exactly 11 digits.
pub fn validate_pesel(pesel: &str) -> Result<(), AppError> {
    if PESEL_RE.is_match(pesel) {
        Ok(())
    } else {
        Err(AppError::validation("Pesel must be exactly 11 digits"))
    }
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

/// Phone numbers: digits with an optional leading +, 7 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (7..=15).contains(&digits.len())
    {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "'{}' is not a valid phone number",
            phone
        )))
    }
}

/// Polish postal code, NN-NNN.
pub fn validate_postal_code(code: &str) -> Result<(), AppError> {
    if POSTAL_CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "'{}' is not a valid postal code",
            code
        )))
    }
}

pub fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pesel_accepts_exactly_11_digits() {
        assert!(validate_pesel("85010112345").is_ok());
        assert!(validate_pesel("00000000000").is_ok());
    }

    #[test]
    fn pesel_rejects_everything_else() {
        for bad in [
            "8501011234",    // 10 digits
            "850101123456",  // 12 digits
            "8501011234a",   // letter
            "85010 112345",  // space
            "",              // empty
            "-5010112345",   // sign
            "85.1011234.5",  // punctuation
        ] {
            assert!(validate_pesel(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn email_format() {
        assert!(validate_email("jan.kowalski@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("123456789").is_ok());
        assert!(validate_phone("+48123456789").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("12345678901234567").is_err());
        assert!(validate_phone("123-456-789").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn postal_code_format() {
        assert!(validate_postal_code("00-950").is_ok());
        assert!(validate_postal_code("00950").is_err());
        assert!(validate_postal_code("0-950").is_err());
    }

    #[test]
    fn non_empty_check() {
        assert!(require_non_empty("x", "name").is_ok());
        assert!(require_non_empty("", "name").is_err());
        assert!(require_non_empty("   ", "name").is_err());
    }
}
