//! Driving port for the contact directory use-cases.
//!
//! Inbound adapters (HTTP handlers) use this port so they depend only on
//! domain behaviour, never on a concrete store. Production wires it to
//! [`crate::domain::UserDirectoryService`]; tests can substitute any
//! implementation.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserRecord, UserRecordId};

/// Domain use-case port for listing and mutating user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All records, newest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;

    /// Validate a complete draft and persist it.
    async fn create_user(&self, draft: UserDraft) -> Result<UserRecord, Error>;

    /// Validate the provided subset of a draft and amend the record.
    async fn update_user(&self, id: UserRecordId, draft: UserDraft) -> Result<UserRecord, Error>;

    /// Remove a record by identifier.
    async fn delete_user(&self, id: UserRecordId) -> Result<(), Error>;
}
