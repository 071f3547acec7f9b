use crate::auth::jwt::{verify_token, Claims};
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Verified identity of the operator making the request, attached as an
/// extension by the auth middleware.
#[derive(Clone)]
pub struct AuthContext {
    pub employee_id: i64,
    pub role: String,
    pub login: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

fn bearer_claims(req: &Request<axum::body::Body>) -> Result<Claims, Response> {
    let auth_header = match req.headers().get("Authorization").and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return Err(unauthorized("Missing Authorization header")),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return Err(unauthorized("Invalid Authorization format")),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return Err(unauthorized("Server auth misconfiguration")),
    };

    verify_token(token, &secret).map_err(|_| unauthorized("Invalid or expired token"))
}

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let claims = match bearer_claims(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    req.extensions_mut().insert(AuthContext {
        employee_id: claims.sub,
        role: claims.role,
        login: claims.login,
    });

    next.run(req).await
}

/// Same as `require_auth` but the verified role must be admin. The employee
/// management routes hang behind this one.
pub async fn require_admin(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let claims = match bearer_claims(&req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    if claims.role != "admin" {
        return forbidden("Admin role required");
    }

    req.extensions_mut().insert(AuthContext {
        employee_id: claims.sub,
        role: claims.role,
        login: claims.login,
    });

    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody {
        error: msg.to_string(),
        code: "unauthorized",
    });
    (StatusCode::UNAUTHORIZED, body).into_response()
}

fn forbidden(msg: &str) -> Response {
    let body = axum::Json(ErrorBody {
        error: msg.to_string(),
        code: "forbidden",
    });
    (StatusCode::FORBIDDEN, body).into_response()
}
