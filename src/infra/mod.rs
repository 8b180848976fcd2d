//! Infrastructure layer - External systems integration
//!
//! This module handles database connections, repositories and migrations.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{ContactRepository, ContactStore, UserRepository, UserStore};
