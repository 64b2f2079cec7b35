//! # Newsroom Core
//!
//! The domain layer of the Newsroom service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod moderation;
pub mod ports;

pub use error::DomainError;
