//! API middleware.

mod auth;

pub use auth::{attach_user, require_auth, CurrentUser};
