//! Service container - wires repositories into service implementations.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, ContactManager, ContactService};
use crate::config::Config;
use crate::infra::{ContactStore, UserStore};

/// Centralized access to all application services.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    contact_service: Arc<dyn ContactService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        contact_service: Arc<dyn ContactService>,
    ) -> Self {
        Self {
            auth_service,
            contact_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let contacts = Arc::new(ContactStore::new(db));

        let auth_service = Arc::new(Authenticator::new(users, config));
        let contact_service = Arc::new(ContactManager::new(contacts));

        Self {
            auth_service,
            contact_service,
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get contact service
    pub fn contacts(&self) -> Arc<dyn ContactService> {
        self.contact_service.clone()
    }
}
