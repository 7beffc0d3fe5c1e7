//! OpenAPI document for the contacts API.

use utoipa::OpenApi;

use crate::domain::user::UserRecord;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::users::{MessageResponse, UserListResponse, UserPayload, UserResponse};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        UserRecord,
        UserPayload,
        UserListResponse,
        UserResponse,
        MessageResponse,
        ErrorEnvelope,
    )),
    tags(
        (name = "users", description = "Contact record management"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_operation() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document serialises");
        for operation_id in ["listUsers", "createUser", "updateUser", "deleteUser"] {
            assert!(json.contains(operation_id), "missing {operation_id}");
        }
    }
}
