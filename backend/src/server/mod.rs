//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};

use contacts_backend::Trace;
#[cfg(debug_assertions)]
use contacts_backend::doc::ApiDoc;
use contacts_backend::domain::{Error, UserDirectoryService};
use contacts_backend::inbound::http::health::{HealthState, live, ready};
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::inbound::http::users::{create_user, delete_user, list_users, update_user};
use contacts_backend::outbound::persistence::InMemoryUserStore;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the directory service to its record store.
fn build_http_state() -> HttpState {
    let store = Arc::new(InMemoryUserStore::new());
    HttpState::new(Arc::new(UserDirectoryService::new(store)))
}

/// Map body deserialization failures onto the standard error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON payload: {err}")).into()
    })
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1/users")
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .service(delete_user);

    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(build_http_state());

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    tracing::info!(bind_addr = %config.bind_addr, "server listening");
    server.run().await
}
