//! User record HTTP handlers.
//!
//! ```text
//! GET    /api/v1/users          list records, newest first
//! POST   /api/v1/users          create from a complete payload
//! PATCH  /api/v1/users/{id}     amend any subset of fields
//! DELETE /api/v1/users/{id}     remove a record
//! ```
//!
//! Success bodies follow the `{"success": true, ...}` envelope the original
//! clients expect; failures go through [`crate::inbound::http::error`].

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, UserDraft, UserRecord, UserRecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or amending a user record.
///
/// Every field is optional at the wire level; the validation rule decides
/// what a given operation requires.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "0123456789")]
    pub phone_number: Option<String>,
    #[schema(example = "ada@gmail.com")]
    pub email: Option<String>,
    #[schema(example = "12 Crescent Road, London")]
    pub address: Option<String>,
}

impl From<UserPayload> for UserDraft {
    fn from(value: UserPayload) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            phone_number: value.phone_number,
            email: value.email,
            address: value.address,
        }
    }
}

/// Envelope for responses carrying a list of records.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<UserRecord>,
}

/// Envelope for responses carrying a single record.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: UserRecord,
}

/// Envelope for responses carrying only a confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

fn parse_user_id(raw: &str) -> Result<UserRecordId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("user id must be a valid UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_user_id",
        }))
    })
}

/// List all user records, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All user records", body = UserListResponse),
        (status = 503, description = "Record store unavailable", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let data = state.users.list_users().await?;
    Ok(web::Json(UserListResponse {
        success: true,
        data,
    }))
}

/// Create a user record from a complete payload.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Record created", body = UserResponse),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 409, description = "Duplicate email or phone number", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let record = state.users.create_user(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse {
        success: true,
        data: record,
    }))
}

/// Amend any subset of a record's fields.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    request_body = UserPayload,
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record updated", body = UserResponse),
        (status = 400, description = "Bad identifier or field format", body = ErrorEnvelope),
        (status = 404, description = "Unknown identifier", body = ErrorEnvelope),
        (status = 409, description = "Duplicate against another record", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    let record = state
        .users
        .update_user(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse {
        success: true,
        data: record,
    }))
}

/// Remove a record by identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record removed", body = MessageResponse),
        (status = 400, description = "Bad identifier", body = ErrorEnvelope),
        (status = 404, description = "Unknown identifier", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    state.users.delete_user(id).await?;
    Ok(web::Json(MessageResponse {
        success: true,
        message: "User deleted successfully".into(),
    }))
}
