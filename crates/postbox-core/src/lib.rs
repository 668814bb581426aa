//! # Postbox Core
//!
//! The domain layer of the Postbox service.
//! This crate contains the post entity, its validation rules and the creation
//! service, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::DomainError;
pub use service::PostService;
pub use validation::ValidationError;
