use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::AppState;

/// Bearer-token guard for administrator routes.
///
/// If `ADMIN_TOKEN` is configured, every request must carry
/// `Authorization: Bearer <token>` matching that value.
/// Without a configured token the check is disabled (dev mode).
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return next.run(req).await;
    };

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if token == expected => next.run(req).await,
        Some(_) => {
            tracing::warn!(path = %req.uri().path(), "Rejected admin request with invalid token");
            AppError::Unauthorized.into_response()
        }
        None => AppError::Unauthorized.into_response(),
    }
}
