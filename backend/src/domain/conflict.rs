//! Duplicate detection rule for user records.
//!
//! Pure decision procedure shared by the directory service (pre-flight check
//! over store query results) and the store adapter (authoritative check under
//! its write lock). A candidate conflicts when any other record already holds
//! its email or phone number; a record whose identifier equals `exclude` is
//! never a conflict, so updates do not collide with themselves.

use std::fmt;

use crate::domain::{EmailAddress, PhoneNumber, UserRecord, UserRecordId};

/// The uniqueness rule a write would violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DuplicateEmail,
    DuplicatePhoneNumber,
}

impl ConflictKind {
    /// Machine-readable code surfaced in error response details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "email_already_exists",
            Self::DuplicatePhoneNumber => "phone_already_exists",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "A user with this email already exists."),
            Self::DuplicatePhoneNumber => {
                write!(f, "A user with this phone number already exists.")
            }
        }
    }
}

/// Find the conflict a candidate would introduce, if any.
///
/// Only the fields that are present are compared, so partial updates skip
/// checks for untouched fields. When both the email and the phone number
/// collide, the email conflict is reported: email takes precedence over
/// phone regardless of record order.
pub fn detect_conflict(
    existing: &[UserRecord],
    email: Option<&EmailAddress>,
    phone_number: Option<&PhoneNumber>,
    exclude: Option<UserRecordId>,
) -> Option<ConflictKind> {
    let mut duplicate_phone = false;
    for record in existing {
        if exclude.is_some_and(|id| id == record.id) {
            continue;
        }
        if email.is_some_and(|candidate| *candidate == record.email) {
            return Some(ConflictKind::DuplicateEmail);
        }
        if phone_number.is_some_and(|candidate| *candidate == record.phone_number) {
            duplicate_phone = true;
        }
    }
    duplicate_phone.then_some(ConflictKind::DuplicatePhoneNumber)
}
