//! Mapping of SeaORM errors onto repository errors.

use sea_orm::{DbErr, SqlErr};

use postbox_core::error::RepoError;

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    tracing::debug!(error = %err, "database operation failed");

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}
