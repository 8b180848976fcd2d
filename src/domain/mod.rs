//! Domain layer - Core business entities and logic.

mod contact;
mod password;
mod user;

pub use contact::{validate_person_name, validate_phone, Contact, ContactResponse};
pub use password::Password;
pub use user::{User, UserResponse};
