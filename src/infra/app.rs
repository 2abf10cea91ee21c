use axum::http::header::CONTENT_TYPE;
use axum::http::{self};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::gate::{authenticated_only_middleware, guest_only_middleware};
use crate::adapter::http::middleware::session::session_middleware;
use crate::adapter::http::routes::auth::{login, logout, show_login_form};
use crate::adapter::http::routes::user::{dashboard, register, show_registration_form};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

fn build_cors(config: &AppConfig) -> CorsLayer {
    let methods = [http::Method::GET, http::Method::POST];
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE]);
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Registration and login only make sense for visitors who are not logged in.
pub fn guest_router() -> Router<AppState> {
    Router::new()
        .route("/register", get(show_registration_form).post(register))
        .route("/login", get(show_login_form).post(login))
        .route_layer(middleware::from_fn(guest_only_middleware))
}

pub fn member_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/logout", axum::routing::post(logout))
        .route_layer(middleware::from_fn(authenticated_only_middleware))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", Router::new().merge(guest_router()).merge(member_router()))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router())
        .fallback_service(ServeDir::new(&config.application.static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
