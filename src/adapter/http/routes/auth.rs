use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::extractors::session::{CurrentUser, SessionContext};
use crate::adapter::http::middleware::gate::redirect_found;
use crate::adapter::http::schema::auth::LoginRequest;
use crate::adapter::http::schema::page::PageResponse;
use crate::adapter::http::validation::ValidForm;
use crate::application::app_error::AppResult;
use crate::application::dto::auth::LoginDTO;
use crate::application::interactors::auth::LoginInteractor;
use crate::application::interactors::session::{EstablishSessionInteractor, TerminateSessionInteractor};
use crate::domain::gate::{DASHBOARD_PATH, LOGIN_PATH};
use crate::infra::config::AppConfig;

#[utoipa::path(
    get,
    path = "/users/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Login page", body = PageResponse),
        (status = 302, description = "Already logged in, redirect to `/users/dashboard`")
    )
)]
pub async fn show_login_form(CurrentUser(user): CurrentUser) -> Json<PageResponse> {
    Json(PageResponse::new("users/login", user))
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Auth",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, redirect to `/users/dashboard`"),
        (status = 401, description = "Unknown e-mail or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(config): State<Arc<AppConfig>>,
    interactor: LoginInteractor,
    establish: EstablishSessionInteractor,
    session: SessionContext,
    ValidForm(payload): ValidForm<LoginRequest>,
) -> AppResult<Response> {
    let dto = LoginDTO {
        email: payload.email.to_string(),
        password: payload.password,
    };
    let user = interactor.execute(dto).await?;
    let current = session.current().await;
    let established = establish
        .execute(current.as_ref(), user, config.session.idle_timeout)
        .await?;
    session.replace(established).await;
    Ok(redirect_found(DASHBOARD_PATH))
}

#[utoipa::path(
    post,
    path = "/users/logout",
    tag = "Auth",
    responses(
        (status = 302, description = "Session destroyed, redirect to `/users/login`"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn logout(interactor: TerminateSessionInteractor, session: SessionContext) -> AppResult<Response> {
    if let Some(current) = session.current().await {
        interactor.execute(&current).await?;
    }
    session.destroy().await;
    Ok(redirect_found(LOGIN_PATH))
}
