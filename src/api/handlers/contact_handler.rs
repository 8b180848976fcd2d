//! Contact handlers - CRUD over the authenticated user's contacts.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{validate_person_name, validate_phone, ContactResponse};
use crate::errors::AppResult;
use crate::services::{ContactPatch, NewContact};
use crate::types::{ApiResponse, Created};

/// Contact creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    /// Contact first name
    #[validate(custom(function = validate_person_name, message = "First name is required"))]
    #[schema(example = "Jean")]
    pub first_name: String,
    /// Contact last name
    #[validate(custom(function = validate_person_name, message = "Last name is required"))]
    #[schema(example = "Dupont")]
    pub last_name: String,
    /// Phone number (10-20 characters: digits, spaces, hyphens, periods)
    #[validate(custom(
        function = validate_phone,
        message = "Phone must be 10-20 characters of digits, spaces, hyphens or periods"
    ))]
    #[schema(example = "0612345678")]
    pub phone: String,
}

/// Partial contact update request; omitted fields keep their value
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[validate(custom(function = validate_person_name, message = "First name is required"))]
    #[schema(example = "Jean")]
    pub first_name: Option<String>,
    #[validate(custom(function = validate_person_name, message = "Last name is required"))]
    #[schema(example = "Dupont")]
    pub last_name: Option<String>,
    #[validate(custom(
        function = validate_phone,
        message = "Phone must be 10-20 characters of digits, spaces, hyphens or periods"
    ))]
    #[schema(example = "0612345678")]
    pub phone: Option<String>,
}

/// Create contact routes (mounted behind `require_auth`)
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/:id", patch(update_contact).delete(delete_contact))
}

/// List the authenticated user's contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contacts owned by the caller", body = [ContactResponse]),
        (status = 401, description = "Missing, expired or invalid token")
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<ContactResponse>>>> {
    let contacts = state.contact_service.list_contacts(user.id).await?;

    Ok(Json(ApiResponse::success(
        contacts.into_iter().map(ContactResponse::from).collect(),
    )))
}

/// Create a new contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing, expired or invalid token")
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateContactRequest>,
) -> AppResult<Created<ContactResponse>> {
    let contact = state
        .contact_service
        .create_contact(
            user.id,
            NewContact {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(Created(ContactResponse::from(contact)))
}

/// Partially update one of the caller's contacts
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Contact identifier")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateContactRequest>,
) -> AppResult<Json<ApiResponse<ContactResponse>>> {
    let contact = state
        .contact_service
        .update_contact(
            user.id,
            id,
            ContactPatch {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(ContactResponse::from(contact))))
}

/// Permanently delete one of the caller's contacts
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.contact_service.delete_contact(user.id, id).await?;

    Ok(Json(ApiResponse::message("Contact deleted")))
}
