//! The module contains the errors the storage layer can return.
//!
//! The taxonomy mirrors the operation contract:
//!
//! - [`Validation`] rejects malformed input before storage is touched.
//! - [`Conflict`] signals a duplicate PIN at registration.
//! - [`NotFound`] signals an operation against a missing record.
//! - [`Database`], [`Io`] and [`Serialize`] are backend failures and are
//!   never retried here.
//!
//! [`Validation`]: StoreError::Validation
//! [`Conflict`]: StoreError::Conflict
//! [`NotFound`]: StoreError::NotFound
//! [`Database`]: StoreError::Database
//! [`Io`]: StoreError::Io
//! [`Serialize`]: StoreError::Serialize
use sea_orm::DbErr;
use thiserror::Error;

/// Storage layer errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("\"{0}\" already in use")]
    Conflict(String),
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Corrupt(a), Self::Corrupt(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Serialize(a), Self::Serialize(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
