use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub role: Role,
}

/// Middleware that validates access tokens and adds account info to request extensions
pub async fn authenticate<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        error_response(StatusCode::UNAUTHORIZED, "Invalid or expired token")
    })?;

    let account_id = AccountId::from_string(&claims.id).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse account ID from token");
        error_response(StatusCode::UNAUTHORIZED, "Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Middleware rejecting authenticated accounts without the admin role.
///
/// Must run after [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<AuthenticatedAccount>() {
        Some(account) if account.role.is_admin() => Ok(next.run(req).await),
        Some(account) => {
            tracing::warn!(account_id = %account.account_id, "Admin route refused");
            Err(error_response(
                StatusCode::FORBIDDEN,
                "Administrator role required",
            ))
        }
        None => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header",
        )),
    }
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header format. Expected: Bearer <token>",
        )
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status_code": status.as_u16(),
            "data": { "message": message }
        })),
    )
        .into_response()
}
