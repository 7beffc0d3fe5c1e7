//! User record data model and the field validation rule.
//!
//! A [`UserDraft`] is the transient candidate a caller assembles before a
//! write; [`UserDraft::validate`] applies the validation rule and produces a
//! [`NewUserRecord`] ready for insertion. [`UserUpdate`] carries a validated
//! partial change set for amendments. The canonical [`UserRecord`] is only
//! ever produced by the record store.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Email domains a record is allowed to use.
pub const ALLOWED_EMAIL_DOMAINS: [&str; 3] = ["@gmail.com", "@hotmail.com", "@yahoo.com"];

/// Validation errors returned by [`UserDraft::validate`] and the field
/// constructors, in their fixed precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    MissingFields,
    InvalidPhoneFormat,
    InvalidEmailFormat,
    DisallowedEmailDomain,
}

impl UserValidationError {
    /// Machine-readable code surfaced in error response details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidPhoneFormat => "invalid_phone_format",
            Self::InvalidEmailFormat => "invalid_email_format",
            Self::DisallowedEmailDomain => "disallowed_email_domain",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required."),
            Self::InvalidPhoneFormat => {
                write!(f, "Invalid phone number. It should contain 10 digits.")
            }
            Self::InvalidEmailFormat => {
                write!(f, "Invalid email address. Please enter a valid email.")
            }
            Self::DisallowedEmailDomain => write!(
                f,
                "Email must include a valid domain (@gmail.com, @hotmail.com, or @yahoo.com)."
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable record identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserRecordId(Uuid);

impl UserRecordId {
    /// Assign a fresh identifier. Only the record store creates these.
    pub(crate) fn assign() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserRecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new("^[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone number regex failed to compile: {error}"))
    })
}

/// Contact phone number: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "0123456789")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`] from owned input.
    pub fn new(phone_number: impl Into<String>) -> Result<Self, UserValidationError> {
        let phone_number = phone_number.into();
        if !phone_regex().is_match(&phone_number) {
            return Err(UserValidationError::InvalidPhoneFormat);
        }
        Ok(Self(phone_number))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part limited to alphanumerics plus `. _ -`; domain to
        // alphanumerics plus `. -`; TLD 2 to 6 letters.
        let pattern = "^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\\.[a-zA-Z]{2,6}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address: general shape plus an allow-listed domain.
///
/// The domain check is substring containment, so `a@gmail.com.example` is
/// accepted the same way the original form logic accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@gmail.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    ///
    /// Shape is checked before the allow-list so callers always see
    /// [`UserValidationError::InvalidEmailFormat`] for malformed input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmailFormat);
        }
        if !ALLOWED_EMAIL_DOMAINS
            .iter()
            .any(|domain| email.contains(domain))
        {
            return Err(UserValidationError::DisallowedEmailDomain);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Canonical user record owned by the store.
///
/// ## Invariants
/// - `email` and `phone_number` are unique across the store.
/// - `id` and `created_at` are store-assigned and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserRecordId,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(value_type = String, example = "0123456789")]
    pub phone_number: PhoneNumber,
    #[schema(value_type = String, example = "ada@gmail.com")]
    pub email: EmailAddress,
    #[schema(example = "12 Crescent Road, London")]
    pub address: String,
    #[schema(value_type = String, example = "2026-08-07T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

/// Validated candidate for insertion. Produced by [`UserDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: PhoneNumber,
    pub email: EmailAddress,
    pub address: String,
}

/// Transient, disposable candidate held while a record is being composed.
///
/// Each field is optional; blank text counts as not provided. The same draft
/// shape serves both create (all five required) and update (any subset).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Return the provided value unless it is absent or blank.
fn provided(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}

impl UserDraft {
    /// Apply the validation rule and produce an insertable candidate.
    ///
    /// Errors are reported in a fixed order: missing fields first, then phone
    /// format, then email shape, then the email domain allow-list.
    pub fn validate(&self) -> Result<NewUserRecord, UserValidationError> {
        let (Some(first_name), Some(last_name), Some(phone_number), Some(email), Some(address)) = (
            provided(&self.first_name),
            provided(&self.last_name),
            provided(&self.phone_number),
            provided(&self.email),
            provided(&self.address),
        ) else {
            return Err(UserValidationError::MissingFields);
        };

        let phone_number = PhoneNumber::new(phone_number)?;
        let email = EmailAddress::new(email)?;

        Ok(NewUserRecord {
            first_name,
            last_name,
            phone_number,
            email,
            address,
        })
    }
}

/// Validated partial change set for an existing record.
///
/// Absent fields leave the stored value untouched. Blank draft fields are
/// treated as absent, matching the original form's submit behaviour.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
    pub address: Option<String>,
}

impl UserUpdate {
    /// Validate the provided subset of a draft into a change set.
    pub fn from_draft(draft: &UserDraft) -> Result<Self, UserValidationError> {
        let phone_number = provided(&draft.phone_number)
            .map(PhoneNumber::new)
            .transpose()?;
        let email = provided(&draft.email).map(EmailAddress::new).transpose()?;

        Ok(Self {
            first_name: provided(&draft.first_name),
            last_name: provided(&draft.last_name),
            phone_number,
            email,
            address: provided(&draft.address),
        })
    }

    /// True when the change set touches nothing.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }

    /// Copy the present fields onto a stored record.
    pub fn apply_to(&self, record: &mut UserRecord) {
        if let Some(first_name) = &self.first_name {
            record.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            record.last_name = last_name.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            record.phone_number = phone_number.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(address) = &self.address {
            record.address = address.clone();
        }
    }
}
