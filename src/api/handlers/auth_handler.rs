//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::AuthPayload;
use crate::types::ApiResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    /// Optional display name
    #[schema(example = "Jean Dupont")]
    pub name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Successful authentication response: token plus public user fields
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthSuccess {
    pub ok: bool,
    /// Bearer token for subsequent requests
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthPayload> for AuthSuccess {
    fn from(payload: AuthPayload) -> Self {
        Self {
            ok: true,
            token: payload.token,
            user: UserResponse::from(payload.user),
        }
    }
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthSuccess),
        (status = 400, description = "Validation error or email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthSuccess>)> {
    let payload = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(AuthSuccess::from(payload))))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthSuccess),
        (status = 400, description = "Validation error or invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthSuccess>> {
    let payload = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(AuthSuccess::from(payload)))
}

/// Logout acknowledgement
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses((status = 200, description = "Logout acknowledged"))
)]
pub async fn logout() -> Json<ApiResponse<()>> {
    // Tokens are stateless; there is nothing to revoke server-side
    Json(ApiResponse::message("Logged out"))
}
