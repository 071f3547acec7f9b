use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session length: the front end keeps an operator logged in for a working
/// day of 9 hours.
pub const SESSION_HOURS: i64 = 9;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub login: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn sign_token(
    employee_id: i64,
    role: &str,
    login: &str,
    secret: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::hours(SESSION_HOURS);
    let claims = Claims {
        sub: employee_id,
        role: role.to_string(),
        login: login.to_string(),
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_preserves_claims() {
        let token = sign_token(7, "admin", "jkowalski", SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.login, "jkowalski");
    }

    #[test]
    fn expiry_is_nine_hours_out() {
        let token = sign_token(1, "employee", "anowak", SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, (SESSION_HOURS * 3600) as usize);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token(1, "employee", "anowak", SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not.a.token", SECRET).is_err());
    }
}
