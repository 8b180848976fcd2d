//! Authentication service - registration, login and token handling.
//!
//! Tokens are stateless: any request can be verified independently without
//! a server-side session store, at the cost of instant revocation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Build claims for a user, expiring after the configured lifetime
    pub fn new(user_id: Uuid, expiration_days: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::days(expiration_days)).timestamp();

        Self {
            sub: user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Token plus its owner, returned by register and login
#[derive(Debug)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token for it
    async fn register(
        &self,
        email: String,
        password: String,
        name: Option<String>,
    ) -> AppResult<AuthPayload>;

    /// Login with email and password, issuing a token on success
    async fn login(&self, email: String, password: String) -> AppResult<AuthPayload>;

    /// Resolve a bearer token into the user it identifies.
    ///
    /// This is the shared resolution procedure of both auth gate modes:
    /// verify the signature and expiry, then confirm the subject still
    /// exists. A token whose subject vanished counts as unverifiable,
    /// not as a crash.
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

/// Generate a signed token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let claims = Claims::new(user.id, config.jwt_expiration_days);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
}

/// Verify a token and extract its claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::ExpiredToken,
        _ => AppError::InvalidToken,
    })
}

/// Canonical form for emails: trimmed and lowercased, matching what the
/// store holds.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Concrete implementation of [`AuthService`].
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }

    /// Verify a token without resolving its subject
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        email: String,
        password: String,
        name: Option<String>,
    ) -> AppResult<AuthPayload> {
        // Shape validation (email format, password length) happens in the
        // handler's ValidatedJson extractor
        let email = normalize_email(&email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("email"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let name = name.unwrap_or_default().trim().to_string();

        let user = self.users.create(email, password_hash, name).await?;
        let token = generate_token(&user, &self.config)?;

        Ok(AuthPayload { token, user })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthPayload> {
        let email = normalize_email(&email);
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist, so an unknown email and a wrong password stay
        // indistinguishable in timing as well as in message.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_valid, user) = match user_result {
            Some(user) => {
                let valid = Password::from_hash(user.password_hash.clone()).verify(&password);
                (valid, Some(user))
            }
            None => {
                let _ = Password::from_hash(dummy_hash.to_string()).verify(&password);
                (false, None)
            }
        };

        match (password_valid, user) {
            (true, Some(user)) => {
                let token = generate_token(&user, &self.config)?;
                Ok(AuthPayload { token, user })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = verify_token_internal(token, &self.config)?;

        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }
}
