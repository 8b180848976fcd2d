//! Integration tests for API endpoints.
//!
//! These tests drive the real router with mock services, so no database
//! or network is required. Request/response behavior, the auth gates and
//! the wire envelopes are exercised end to end.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use contacts_api::api::{create_router, AppState};
use contacts_api::config::Config;
use contacts_api::domain::{Contact, User};
use contacts_api::errors::{AppError, AppResult};
use contacts_api::infra::Database;
use contacts_api::services::{
    AuthPayload, AuthService, ContactPatch, ContactService, NewContact,
};

// =============================================================================
// Fixtures
// =============================================================================

fn user_a_id() -> Uuid {
    Uuid::from_u128(0xA1)
}

fn user_b_id() -> Uuid {
    Uuid::from_u128(0xB2)
}

fn contact_id() -> Uuid {
    Uuid::from_u128(0xC3)
}

fn user_a() -> User {
    User::new(
        user_a_id(),
        "a@b.com".to_string(),
        "$argon2-hash".to_string(),
        "Alice".to_string(),
    )
}

fn user_b() -> User {
    User::new(
        user_b_id(),
        "b@b.com".to_string(),
        "$argon2-hash".to_string(),
        "Bob".to_string(),
    )
}

/// The one contact that exists in the mock store, owned by user A
fn stored_contact() -> Contact {
    Contact {
        id: contact_id(),
        first_name: "Jean".to_string(),
        last_name: "Dupont".to_string(),
        phone: "0612345678".to_string(),
        user_id: user_a_id(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// =============================================================================
// Mock Services
// =============================================================================

/// Mock auth service with fixed tokens: "token-a"/"token-b" resolve to
/// users A and B, "expired-token" fails as expired, anything else as
/// invalid.
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(
        &self,
        email: String,
        _password: String,
        name: Option<String>,
    ) -> AppResult<AuthPayload> {
        if email == "dup@example.com" {
            return Err(AppError::conflict("email"));
        }

        Ok(AuthPayload {
            token: "fresh-token".to_string(),
            user: User::new(
                Uuid::new_v4(),
                email,
                "hashed".to_string(),
                name.unwrap_or_default(),
            ),
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthPayload> {
        if email == "a@b.com" && password == "secret1" {
            Ok(AuthPayload {
                token: "token-a".to_string(),
                user: user_a(),
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        match token {
            "token-a" => Ok(user_a()),
            "token-b" => Ok(user_b()),
            "expired-token" => Err(AppError::ExpiredToken),
            _ => Err(AppError::InvalidToken),
        }
    }
}

/// Mock contact service holding exactly one contact, owned by user A.
struct MockContactService;

impl MockContactService {
    /// Shared existence-plus-ownership gate: anything that is not user A
    /// asking about the stored contact is "not found"
    fn find_owned(&self, owner: Uuid, id: Uuid) -> AppResult<Contact> {
        if owner == user_a_id() && id == contact_id() {
            Ok(stored_contact())
        } else {
            Err(AppError::NotFound)
        }
    }
}

#[async_trait]
impl ContactService for MockContactService {
    async fn list_contacts(&self, owner: Uuid) -> AppResult<Vec<Contact>> {
        if owner == user_a_id() {
            Ok(vec![stored_contact()])
        } else {
            Ok(vec![])
        }
    }

    async fn create_contact(&self, owner: Uuid, input: NewContact) -> AppResult<Contact> {
        Ok(Contact {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn update_contact(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: ContactPatch,
    ) -> AppResult<Contact> {
        let mut contact = self.find_owned(owner, id)?;

        if let Some(first_name) = patch.first_name {
            contact.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            contact.last_name = last_name;
        }
        if let Some(phone) = patch.phone {
            contact.phone = phone;
        }

        Ok(contact)
    }

    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        self.find_owned(owner, id)?;
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let connection = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let config = Config::new(
        "postgres://unused",
        "test-secret-key-minimum-32-chars!!",
        7,
        "127.0.0.1",
        0,
        vec![],
    );

    let state = AppState::new(
        Arc::new(MockAuthService),
        Arc::new(MockContactService),
        Arc::new(Database::from_connection(connection)),
        config,
    );

    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn test_register_returns_token_and_public_user() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({"email": "a@b.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "a@b.com");
    // The hash never rides along
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_validation_error_map() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({"email": "not-an-email", "password": "short"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["errors"]["email"].is_string());
    assert!(body["errors"]["password"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({"email": "dup@example.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["errors"]["email"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_is_generic() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "a@b.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    // Generic message, no field map that could aid enumeration
    assert_eq!(body["message"], "Invalid email or password");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_login_success() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "a@b.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["token"], "token-a");
}

// =============================================================================
// Auth Gate
// =============================================================================

#[tokio::test]
async fn test_protected_route_without_token() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/contacts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Access denied - missing token");
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let response = test_app()
        .oneshot(authed_request("GET", "/api/contacts", "expired-token", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Session expired, please log in again");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let response = test_app()
        .oneshot(authed_request("GET", "/api/contacts", "garbage", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_non_bearer_header_counts_as_missing() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/contacts")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Access denied - missing token");
}

#[tokio::test]
async fn test_optional_gate_passes_unauthenticated_requests() {
    // No Authorization header at all: the router-wide optional gate must
    // let the request through rather than rejecting it
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_optional_gate_ignores_bad_tokens() {
    // A garbage token on a public route is ignored, not rejected
    let response = test_app()
        .oneshot(authed_request("GET", "/api/auth/logout", "garbage", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Contacts CRUD
// =============================================================================

#[tokio::test]
async fn test_list_contacts_scoped_to_caller() {
    let response = test_app()
        .oneshot(authed_request("GET", "/api/contacts", "token-a", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["firstName"], "Jean");

    // User B sees an empty list, not A's contacts
    let response = test_app()
        .oneshot(authed_request("GET", "/api/contacts", "token-b", None))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_contact() {
    let response = test_app()
        .oneshot(authed_request(
            "POST",
            "/api/contacts",
            "token-a",
            Some(json!({
                "firstName": "Jean",
                "lastName": "Dupont",
                "phone": "0612345678"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["data"]["firstName"], "Jean");
    assert_eq!(body["data"]["lastName"], "Dupont");
    assert_eq!(body["data"]["phone"], "0612345678");
}

#[tokio::test]
async fn test_create_contact_rejects_short_phone() {
    let response = test_app()
        .oneshot(authed_request(
            "POST",
            "/api/contacts",
            "token-a",
            Some(json!({
                "firstName": "Jean",
                "lastName": "Dupont",
                "phone": "123456789"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["errors"]["phone"].is_string());
}

#[tokio::test]
async fn test_create_contact_rejects_blank_names() {
    let response = test_app()
        .oneshot(authed_request(
            "POST",
            "/api/contacts",
            "token-a",
            Some(json!({
                "firstName": "   ",
                "lastName": "Dupont",
                "phone": "0612345678"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["errors"]["firstName"].is_string());
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let uri = format!("/api/contacts/{}", contact_id());
    let response = test_app()
        .oneshot(authed_request(
            "PATCH",
            &uri,
            "token-a",
            Some(json!({"phone": "0798765432"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["phone"], "0798765432");
    assert_eq!(body["data"]["firstName"], "Jean");
    assert_eq!(body["data"]["lastName"], "Dupont");
}

#[tokio::test]
async fn test_update_rejects_invalid_phone_even_when_alone() {
    let uri = format!("/api/contacts/{}", contact_id());
    let response = test_app()
        .oneshot(authed_request(
            "PATCH",
            &uri,
            "token-a",
            Some(json!({"phone": "123456789012345678901"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["errors"]["phone"].is_string());
}

#[tokio::test]
async fn test_update_foreign_contact_is_not_found() {
    let uri = format!("/api/contacts/{}", contact_id());
    let response = test_app()
        .oneshot(authed_request(
            "PATCH",
            &uri,
            "token-b",
            Some(json!({"phone": "0798765432"})),
        ))
        .await
        .unwrap();

    // 404, not 403: existence must not leak to non-owners
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_delete_contact() {
    let uri = format!("/api/contacts/{}", contact_id());
    let response = test_app()
        .oneshot(authed_request("DELETE", &uri, "token-a", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_delete_foreign_contact_is_not_found() {
    let uri = format!("/api/contacts/{}", contact_id());
    let response = test_app()
        .oneshot(authed_request("DELETE", &uri, "token-b", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["path"], "/api/nope");
}
