//! Contact repository - persistence for contacts.
//!
//! Ownership scoping lives here: lookups that matter for authorization
//! always filter on both the contact id and the owner id.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::contact::{self, Entity as ContactEntity};
use crate::domain::Contact;
use crate::errors::{AppError, AppResult};

/// Contact repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List all contacts belonging to `owner`, in stable creation order
    async fn list_by_owner(&self, owner: Uuid) -> AppResult<Vec<Contact>>;

    /// Find a contact only if it exists and belongs to `owner`
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> AppResult<Option<Contact>>;

    /// Insert a new contact owned by `owner`
    async fn insert(
        &self,
        owner: Uuid,
        first_name: String,
        last_name: String,
        phone: String,
    ) -> AppResult<Contact>;

    /// Update the provided fields of an existing contact; `None` fields
    /// keep their current value
    async fn update(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Contact>;

    /// Permanently delete a contact
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`ContactRepository`].
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn list_by_owner(&self, owner: Uuid) -> AppResult<Vec<Contact>> {
        let models = ContactEntity::find()
            .filter(contact::Column::UserId.eq(owner))
            .order_by_asc(contact::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> AppResult<Option<Contact>> {
        let result = ContactEntity::find_by_id(id)
            .filter(contact::Column::UserId.eq(owner))
            .one(&self.db)
            .await?;

        Ok(result.map(Contact::from))
    }

    async fn insert(
        &self,
        owner: Uuid,
        first_name: String,
        last_name: String,
        phone: String,
    ) -> AppResult<Contact> {
        let now = chrono::Utc::now();
        let active_model = contact::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(first_name),
            last_name: Set(last_name),
            phone: Set(phone),
            user_id: Set(owner),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Contact::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Contact> {
        let existing = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: contact::ActiveModel = existing.into();

        if let Some(first_name) = first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone) = phone {
            active.phone = Set(phone);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Contact::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ContactEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
