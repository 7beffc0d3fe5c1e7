//! End-to-end coverage of the users REST surface.
//!
//! Each test wires a fresh in-memory store through the real service and
//! handler stack, so every flow below exercises validation, conflict
//! detection, and persistence exactly as the running server does.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use contacts_backend::Trace;
use contacts_backend::domain::UserDirectoryService;
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::inbound::http::users::{create_user, delete_user, list_users, update_user};
use contacts_backend::outbound::persistence::InMemoryUserStore;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = UserDirectoryService::new(Arc::new(InMemoryUserStore::new()));
    let state = HttpState::new(Arc::new(service));
    App::new()
        .app_data(web::Data::new(state))
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .service(
            web::scope("/api/v1/users")
                .service(list_users)
                .service(create_user)
                .service(update_user)
                .service(delete_user),
        )
}

fn payload(first_name: &str, phone_number: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Lovelace",
        "phoneNumber": phone_number,
        "email": email,
        "address": "12 Crescent Road, London",
    })
}

async fn post_user<S, B>(app: &S, body: &Value) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/")
            .set_json(body)
            .to_request(),
    )
    .await
}

async fn created_id<S, B>(app: &S, body: &Value) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = post_user(app, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body.pointer("/data/id")
        .and_then(Value::as_str)
        .expect("created record has an id")
        .to_owned()
}

async fn list_data<S, B>(app: &S) -> Vec<Value>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&json!(true)));
    body.pointer("/data")
        .and_then(Value::as_array)
        .expect("data is an array")
        .clone()
}

#[actix_web::test]
async fn created_records_are_listed_newest_first() {
    let app = actix_test::init_service(test_app()).await;

    created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    // Creation timestamps order the listing; keep them distinct.
    tokio::time::sleep(Duration::from_millis(5)).await;
    created_id(&app, &payload("Grace", "9876543210", "grace@yahoo.com")).await;

    let data = list_data(&app).await;
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].get("firstName"), Some(&json!("Grace")));
    assert_eq!(data[1].get("firstName"), Some(&json!("Ada")));
}

#[rstest]
#[case::bad_phone(
    payload("Ada", "12345", "not-even-an-email"),
    "invalid_phone_format"
)]
#[case::bad_email_shape(
    payload("Ada", "0123456789", "not-an-email"),
    "invalid_email_format"
)]
#[case::domain_outside_allow_list(
    payload("Ada", "0123456789", "a@b.com"),
    "disallowed_email_domain"
)]
#[actix_web::test]
async fn invalid_payloads_are_rejected_in_rule_order(
    #[case] body: Value,
    #[case] expected_code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let response = post_user(&app, &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&json!(false)));
    assert_eq!(body.pointer("/details/code"), Some(&json!(expected_code)));

    assert!(list_data(&app).await.is_empty());
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict_and_nothing_is_written() {
    let app = actix_test::init_service(test_app()).await;

    created_id(&app, &payload("Ada", "0123456789", "x@gmail.com")).await;
    let response = post_user(&app, &payload("Grace", "9876543210", "x@gmail.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code"),
        Some(&json!("email_already_exists"))
    );

    let data = list_data(&app).await;
    let holders: Vec<_> = data
        .iter()
        .filter(|record| record.get("email") == Some(&json!("x@gmail.com")))
        .collect();
    assert_eq!(holders.len(), 1);
}

#[actix_web::test]
async fn duplicate_phone_is_a_conflict() {
    let app = actix_test::init_service(test_app()).await;

    created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = post_user(&app, &payload("Grace", "0123456789", "grace@gmail.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code"),
        Some(&json!("phone_already_exists"))
    );
}

#[actix_web::test]
async fn email_conflict_wins_when_both_fields_collide() {
    let app = actix_test::init_service(test_app()).await;

    created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = post_user(&app, &payload("Grace", "0123456789", "ada@gmail.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code"),
        Some(&json!("email_already_exists"))
    );
}

#[actix_web::test]
async fn updating_a_record_to_its_own_phone_succeeds() {
    let app = actix_test::init_service(test_app()).await;

    let id = created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({ "phoneNumber": "0123456789" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/data/phoneNumber"), Some(&json!("0123456789")));
}

#[actix_web::test]
async fn updating_to_another_records_phone_is_a_conflict() {
    let app = actix_test::init_service(test_app()).await;

    created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let id = created_id(&app, &payload("Grace", "9876543210", "grace@gmail.com")).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({ "phoneNumber": "0123456789" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code"),
        Some(&json!("phone_already_exists"))
    );
}

#[actix_web::test]
async fn patch_touches_only_the_provided_fields() {
    let app = actix_test::init_service(test_app()).await;

    let id = created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({ "address": "1 New Street", "firstName": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/data/address"), Some(&json!("1 New Street")));
    // Blank text counts as "not provided" and leaves the stored value alone.
    assert_eq!(body.pointer("/data/firstName"), Some(&json!("Ada")));
    assert_eq!(body.pointer("/data/email"), Some(&json!("ada@gmail.com")));
}

#[actix_web::test]
async fn patch_rejects_malformed_field_formats() {
    let app = actix_test::init_service(test_app()).await;

    let id = created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({ "email": "a@b.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code"),
        Some(&json!("disallowed_email_domain"))
    );
}

#[actix_web::test]
async fn patch_unknown_id_is_not_found() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .set_json(json!({ "firstName": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&json!(false)));
    assert_eq!(body.pointer("/details/code"), Some(&json!("user_not_found")));
}

#[actix_web::test]
async fn delete_round_trip_removes_the_record() {
    let app = actix_test::init_service(test_app()).await;

    let id = created_id(&app, &payload("Ada", "0123456789", "ada@gmail.com")).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("User deleted successfully")));
    assert!(list_data(&app).await.is_empty());

    // A second delete of the same identifier is a 404, not a silent success.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn responses_carry_a_trace_id_header() {
    let app = actix_test::init_service(test_app()).await;

    let response = post_user(&app, &payload("Ada", "12345", "ada@gmail.com")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("trace-id").is_some());

    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("traceId").is_some());
}
