//! Domain types and rules for the contact directory.
//!
//! Purpose: hold the record model, the field validation rule, the duplicate
//! detection rule, and the driving-port service, all transport agnostic.
//! Inbound adapters translate domain errors into HTTP responses; outbound
//! adapters implement the ports.

pub mod conflict;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::conflict::{ConflictKind, detect_conflict};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    ALLOWED_EMAIL_DOMAINS, EmailAddress, NewUserRecord, PhoneNumber, UserDraft, UserRecord,
    UserRecordId, UserUpdate, UserValidationError,
};
pub use self::user_directory_service::UserDirectoryService;
