//! Contact service - ownership-scoped CRUD over contacts.
//!
//! Every operation receives the authenticated owner and limits itself to
//! that owner's records. A contact that exists but belongs to someone else
//! is reported as not found, never as forbidden, so cross-user requests
//! cannot probe for record existence.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Contact;
use crate::errors::{AppResult, OptionExt};
use crate::infra::ContactRepository;

/// Fields for a new contact (already shape-validated)
#[derive(Debug, Clone)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Partial update: `None` fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Contact service trait for dependency injection.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// List all contacts owned by `owner`
    async fn list_contacts(&self, owner: Uuid) -> AppResult<Vec<Contact>>;

    /// Create a contact owned by `owner`
    async fn create_contact(&self, owner: Uuid, input: NewContact) -> AppResult<Contact>;

    /// Partially update one of `owner`'s contacts
    async fn update_contact(&self, owner: Uuid, id: Uuid, patch: ContactPatch)
        -> AppResult<Contact>;

    /// Permanently delete one of `owner`'s contacts
    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of [`ContactService`].
pub struct ContactManager {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactManager {
    /// Create new contact service instance
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactService for ContactManager {
    async fn list_contacts(&self, owner: Uuid) -> AppResult<Vec<Contact>> {
        self.contacts.list_by_owner(owner).await
    }

    async fn create_contact(&self, owner: Uuid, input: NewContact) -> AppResult<Contact> {
        // Field rules (non-empty names, phone shape) are enforced by the
        // handler's ValidatedJson extractor; stored values are the trimmed
        // forms the rules were checked against
        self.contacts
            .insert(
                owner,
                input.first_name.trim().to_string(),
                input.last_name.trim().to_string(),
                input.phone.trim().to_string(),
            )
            .await
    }

    async fn update_contact(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: ContactPatch,
    ) -> AppResult<Contact> {
        // Missing and foreign-owned are deliberately the same outcome
        let existing = self.contacts.find_owned(id, owner).await?.ok_or_not_found()?;

        self.contacts
            .update(
                existing.id,
                patch.first_name.map(|v| v.trim().to_string()),
                patch.last_name.map(|v| v.trim().to_string()),
                patch.phone.map(|v| v.trim().to_string()),
            )
            .await
    }

    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        let existing = self.contacts.find_owned(id, owner).await?.ok_or_not_found()?;

        self.contacts.delete(existing.id).await
    }
}
