//! # Newsroom Infrastructure
//!
//! Concrete implementations of the ports defined in `newsroom-core`.
//! This crate contains the database repositories, their in-memory
//! counterparts, and the authentication services.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use memory::{InMemoryCommentRepository, InMemoryNewsRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresCommentRepository, PostgresNewsRepository, PostgresUserRepository,
};
