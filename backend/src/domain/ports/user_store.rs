//! Port abstraction for record store adapters and their errors.

use async_trait::async_trait;

use crate::domain::{
    EmailAddress, NewUserRecord, PhoneNumber, UserRecord, UserRecordId, UserUpdate,
};

/// Field protected by the store's uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    PhoneNumber,
}

/// Persistence errors raised by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// A write would break the uniqueness constraint on `field`.
    #[error("uniqueness constraint violated on {field:?}")]
    UniqueViolation { field: UniqueField },
}

impl UserStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn unique_violation(field: UniqueField) -> Self {
        Self::UniqueViolation { field }
    }
}

/// Port for the document store holding canonical user records.
///
/// Adapters own identifier and creation-timestamp assignment, and enforce
/// the email/phone uniqueness invariant atomically on every write. The
/// application-level conflict check is advisory; this constraint is the
/// authoritative one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by email, optionally ignoring one record.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        exclude: Option<UserRecordId>,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Exact-match lookup by phone number, optionally ignoring one record.
    async fn find_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
        exclude: Option<UserRecordId>,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Persist a validated candidate, assigning its id and creation time.
    async fn insert(&self, candidate: NewUserRecord) -> Result<UserRecord, UserStoreError>;

    /// Apply a partial change set. Returns `None` when the id is unknown.
    async fn update(
        &self,
        id: UserRecordId,
        changes: UserUpdate,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Remove a record. Returns `false` when the id is unknown.
    async fn delete(&self, id: UserRecordId) -> Result<bool, UserStoreError>;

    /// All records, newest creation first, identifier descending on ties.
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserStoreError>;
}
