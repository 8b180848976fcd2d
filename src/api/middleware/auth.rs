//! Token authentication middleware.
//!
//! Two gates share one resolution procedure (`AuthService::authenticate`):
//! `require_auth` rejects requests without a provable identity before they
//! reach the handler, `attach_user` resolves an identity when it can and
//! lets the request through either way.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// Authenticated user extracted from a verified token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Extract the bearer credential from the Authorization header.
///
/// Anything that is not a well-formed `Bearer <token>` value counts as
/// "no credential presented", not as a malformed token.
fn bearer_token(request: &Request) -> Option<String> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_TOKEN_PREFIX)?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Mandatory authentication middleware.
///
/// Rejects with a distinct 401 reason for a missing credential, an expired
/// token and an unverifiable one; otherwise injects [`CurrentUser`] into
/// the request extensions and proceeds.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::MissingToken)?;

    let user = state.auth_service.authenticate(&token).await.map_err(|e| {
        tracing::debug!("Authentication rejected: {}", e);
        e
    })?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

/// Optional authentication middleware.
///
/// Attaches [`CurrentUser`] when a valid identity can be resolved and
/// proceeds without one on any failure; this gate never rejects.
pub async fn attach_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request) {
        match state.auth_service.authenticate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser::from(user));
            }
            Err(e) => tracing::debug!("Optional authentication skipped: {}", e),
        }
    }

    next.run(request).await
}
