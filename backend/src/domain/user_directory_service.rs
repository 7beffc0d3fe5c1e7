//! Contact directory domain service.
//!
//! Implements the [`UserDirectory`] driving port on top of a [`UserStore`]:
//! validates drafts, runs the duplicate-detection rule over store queries
//! before every write, and maps store failures onto domain errors. The
//! pre-flight conflict check is check-then-write; the store's own uniqueness
//! constraint backstops the race window, and its violation is translated to
//! the same conflict errors the pre-flight produces.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::conflict::{ConflictKind, detect_conflict};
use crate::domain::ports::{UniqueField, UserDirectory, UserStore, UserStoreError};
use crate::domain::{
    EmailAddress, Error, PhoneNumber, UserDraft, UserRecord, UserRecordId, UserUpdate,
    UserValidationError,
};

/// Directory service implementing the driving port.
#[derive(Clone)]
pub struct UserDirectoryService<S> {
    store: Arc<S>,
}

impl<S> UserDirectoryService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: UserStore> UserDirectoryService<S> {
    fn map_validation_error(error: UserValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({ "code": error.code() }))
    }

    fn map_conflict(kind: ConflictKind) -> Error {
        Error::conflict(kind.to_string()).with_details(json!({ "code": kind.code() }))
    }

    fn map_store_error(error: UserStoreError) -> Error {
        match error {
            UserStoreError::Connection { message } => {
                Error::service_unavailable(format!("user store unavailable: {message}"))
            }
            UserStoreError::Query { message } => {
                Error::internal(format!("user store error: {message}"))
            }
            UserStoreError::UniqueViolation { field } => Self::map_conflict(match field {
                UniqueField::Email => ConflictKind::DuplicateEmail,
                UniqueField::PhoneNumber => ConflictKind::DuplicatePhoneNumber,
            }),
        }
    }

    fn user_not_found() -> Error {
        Error::not_found("User not found").with_details(json!({ "code": "user_not_found" }))
    }

    /// Fetch the records a candidate could collide with.
    ///
    /// Only the present fields are queried, so partial updates skip lookups
    /// for untouched fields.
    async fn conflict_candidates(
        &self,
        email: Option<&EmailAddress>,
        phone_number: Option<&PhoneNumber>,
        exclude: Option<UserRecordId>,
    ) -> Result<Vec<UserRecord>, Error> {
        let mut existing = Vec::new();
        if let Some(email) = email {
            if let Some(record) = self
                .store
                .find_by_email(email, exclude)
                .await
                .map_err(Self::map_store_error)?
            {
                existing.push(record);
            }
        }
        if let Some(phone_number) = phone_number {
            if let Some(record) = self
                .store
                .find_by_phone_number(phone_number, exclude)
                .await
                .map_err(Self::map_store_error)?
            {
                existing.push(record);
            }
        }
        Ok(existing)
    }

    async fn ensure_unique(
        &self,
        email: Option<&EmailAddress>,
        phone_number: Option<&PhoneNumber>,
        exclude: Option<UserRecordId>,
    ) -> Result<(), Error> {
        let existing = self.conflict_candidates(email, phone_number, exclude).await?;
        match detect_conflict(&existing, email, phone_number, exclude) {
            Some(kind) => Err(Self::map_conflict(kind)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<S: UserStore> UserDirectory for UserDirectoryService<S> {
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.store.list_all().await.map_err(Self::map_store_error)
    }

    async fn create_user(&self, draft: UserDraft) -> Result<UserRecord, Error> {
        let candidate = draft.validate().map_err(Self::map_validation_error)?;
        self.ensure_unique(
            Some(&candidate.email),
            Some(&candidate.phone_number),
            None,
        )
        .await?;
        self.store
            .insert(candidate)
            .await
            .map_err(Self::map_store_error)
    }

    async fn update_user(&self, id: UserRecordId, draft: UserDraft) -> Result<UserRecord, Error> {
        let changes = UserUpdate::from_draft(&draft).map_err(Self::map_validation_error)?;
        self.ensure_unique(
            changes.email.as_ref(),
            changes.phone_number.as_ref(),
            Some(id),
        )
        .await?;
        self.store
            .update(id, changes)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(Self::user_not_found)
    }

    async fn delete_user(&self, id: UserRecordId) -> Result<(), Error> {
        if self.store.delete(id).await.map_err(Self::map_store_error)? {
            Ok(())
        } else {
            Err(Self::user_not_found())
        }
    }
}
