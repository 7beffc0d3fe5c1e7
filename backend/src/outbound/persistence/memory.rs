//! In-memory record store adapter.
//!
//! Stands in for the document store: it owns the canonical records, assigns
//! identifiers and creation timestamps, and enforces the email/phone
//! uniqueness constraint atomically under its write lock. That constraint is
//! the authoritative backstop for the check-then-write race; the service's
//! pre-flight check only exists to produce a friendly error first.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::conflict::{ConflictKind, detect_conflict};
use crate::domain::ports::{UniqueField, UserStore, UserStoreError};
use crate::domain::{
    EmailAddress, NewUserRecord, PhoneNumber, UserRecord, UserRecordId, UserUpdate,
};

/// Record store keeping all user records in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing records, for tests and demos.
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn unique_field_for(kind: ConflictKind) -> UniqueField {
    match kind {
        ConflictKind::DuplicateEmail => UniqueField::Email,
        ConflictKind::DuplicatePhoneNumber => UniqueField::PhoneNumber,
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        exclude: Option<UserRecordId>,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|record| record.email == *email && exclude != Some(record.id))
            .cloned())
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
        exclude: Option<UserRecordId>,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|record| record.phone_number == *phone_number && exclude != Some(record.id))
            .cloned())
    }

    async fn insert(&self, candidate: NewUserRecord) -> Result<UserRecord, UserStoreError> {
        let mut records = self.records.write().await;
        if let Some(kind) = detect_conflict(
            &records,
            Some(&candidate.email),
            Some(&candidate.phone_number),
            None,
        ) {
            return Err(UserStoreError::unique_violation(unique_field_for(kind)));
        }

        let record = UserRecord {
            id: UserRecordId::assign(),
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            phone_number: candidate.phone_number,
            email: candidate.email,
            address: candidate.address,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: UserRecordId,
        changes: UserUpdate,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let mut records = self.records.write().await;
        if let Some(kind) = detect_conflict(
            &records,
            changes.email.as_ref(),
            changes.phone_number.as_ref(),
            Some(id),
        ) {
            return Err(UserStoreError::unique_violation(unique_field_for(kind)));
        }

        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        changes.apply_to(record);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: UserRecordId) -> Result<bool, UserStoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        let records = self.records.read().await;
        let mut listed: Vec<UserRecord> = records.clone();
        listed.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(listed)
    }
}
