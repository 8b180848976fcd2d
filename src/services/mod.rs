//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits for
//! dependency inversion.

mod auth_service;
mod container;
mod contact_service;

pub use auth_service::{AuthPayload, AuthService, Authenticator, Claims};
pub use contact_service::{ContactManager, ContactPatch, ContactService, NewContact};
pub use container::Services;
