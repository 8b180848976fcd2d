//! Contact domain entity and field validation rules.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationError;

use crate::config::{MAX_PHONE_LENGTH, MIN_PHONE_LENGTH};

/// Accepted phone values: digits, spaces, hyphens and periods only.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9\s\-.]{10,20}$").expect("phone regex is valid")
});

/// Contact domain entity.
///
/// `user_id` references the owning user; it is set at creation and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact response (client-facing projection, owner reference omitted)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Unique contact identifier
    #[schema(example = "d4f0b1a2-3c4d-5e6f-7a8b-9c0d1e2f3a4b")]
    pub id: Uuid,
    /// Contact first name
    #[schema(example = "Jean")]
    pub first_name: String,
    /// Contact last name
    #[schema(example = "Dupont")]
    pub last_name: String,
    /// Contact phone number (10-20 characters)
    #[schema(example = "0612345678")]
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            phone: contact.phone,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Validate a person name: non-empty after trimming.
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("name");
        err.message = Some(Cow::from("Must not be empty"));
        return Err(err);
    }
    Ok(())
}

/// Validate a phone value: 10-20 characters, digits, spaces, hyphens,
/// periods only. The check runs on the trimmed value, which is also what
/// gets stored.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if !PHONE_RE.is_match(trimmed) {
        let mut err = ValidationError::new("phone");
        err.message = Some(Cow::from(format!(
            "Phone must be {}-{} characters of digits, spaces, hyphens or periods",
            MIN_PHONE_LENGTH, MAX_PHONE_LENGTH
        )));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_boundary_lengths() {
        // 9 characters rejected, 10 accepted
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("1234567890").is_ok());
        // 20 accepted, 21 rejected
        assert!(validate_phone("12345678901234567890").is_ok());
        assert!(validate_phone("123456789012345678901").is_err());
    }

    #[test]
    fn test_phone_allowed_characters() {
        assert!(validate_phone("06 12 34 56 78").is_ok());
        assert!(validate_phone("06-12-34-56-78").is_ok());
        assert!(validate_phone("06.12.34.56.78").is_ok());
        assert!(validate_phone("06+12+34+56+78").is_err());
        assert!(validate_phone("phone12345").is_err());
    }

    #[test]
    fn test_phone_trimmed_before_check() {
        // Surrounding whitespace does not count towards the length
        assert!(validate_phone("  0612345678  ").is_ok());
        assert!(validate_phone("  123456789  ").is_err());
    }

    #[test]
    fn test_person_name_rejects_blank() {
        assert!(validate_person_name("Jean").is_ok());
        assert!(validate_person_name("").is_err());
        assert!(validate_person_name("   ").is_err());
    }
}
