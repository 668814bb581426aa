//! Post storage - PostgreSQL via SeaORM, with an in-memory fallback.

mod connections;
mod memory_repo;

#[cfg(feature = "postgres")]
mod error_mapping;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory_repo::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
