use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::extractors::session::{CurrentUser, SessionContext};
use crate::adapter::http::middleware::gate::redirect_found;
use crate::adapter::http::schema::page::PageResponse;
use crate::adapter::http::schema::user::CreateUserRequest;
use crate::adapter::http::validation::ValidForm;
use crate::application::app_error::AppResult;
use crate::application::dto::user::CreateUserDTO;
use crate::application::interactors::session::EstablishSessionInteractor;
use crate::application::interactors::users::CreateUserInteractor;
use crate::domain::gate::DASHBOARD_PATH;
use crate::infra::config::AppConfig;

#[utoipa::path(
    get,
    path = "/users/register",
    tag = "Users",
    responses(
        (status = 200, description = "Registration page", body = PageResponse),
        (status = 302, description = "Already logged in, redirect to `/users/dashboard`")
    )
)]
pub async fn show_registration_form(CurrentUser(user): CurrentUser) -> Json<PageResponse> {
    Json(PageResponse::new("users/register", user))
}

#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Users",
    request_body(content = CreateUserRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created and logged in, redirect to `/users/dashboard`"),
        (status = 400, description = "Malformed form", body = ErrorResponse),
        (status = 409, description = "E-mail already registered", body = ErrorResponse),
        (status = 422, description = "Invalid form fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(config): State<Arc<AppConfig>>,
    interactor: CreateUserInteractor,
    establish: EstablishSessionInteractor,
    session: SessionContext,
    ValidForm(payload): ValidForm<CreateUserRequest>,
) -> AppResult<Response> {
    let dto = CreateUserDTO {
        display_name: payload.display_name,
        email: payload.email.to_string(),
        password: payload.password.value().to_string(),
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
    get,
    path = "/users/dashboard",
    tag = "Users",
    responses(
        (status = 200, description = "Dashboard of the logged-in user", body = PageResponse),
        (status = 302, description = "Not logged in, redirect to `/users/login`")
    ),
    security(("cookieAuth" = []))
)]
pub async fn dashboard(CurrentUser(user): CurrentUser) -> Json<PageResponse> {
    Json(PageResponse::new("users/dashboard", user))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::domain::entities::session::Session;
    use crate::infra::app::create_app;
    use crate::infra::state::AppState;
    use crate::tests::fixtures::init_test_app_state;
    use crate::tests::helpers::{
        body_json, form_request, get_request, insert_user, location, session_cookie, set_cookie_header,
        unique_email, PASSWORD,
    };

    fn registration_form<'a>(display_name: &'a str, email: &'a str, password: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![("display_name", display_name), ("email", email), ("password", password)]
    }

    #[rstest]
    #[tokio::test]
    async fn test_registration_form_for_anonymous_visitor(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());

        let response = app.oneshot(get_request("/users/register", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie_header(&response).starts_with("app_session="));
        let json = body_json(response).await;
        assert_eq!(json["view"], "users/register");
        assert!(json["user"].is_null());
    }

    // Full round trip: register, reach the dashboard, get bounced from the
    // guest pages, log out, and lose access to the dashboard again.
    #[rstest]
    #[tokio::test]
    async fn test_register_dashboard_logout_flow(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());
        let email = unique_email();

        let response = app.clone().oneshot(get_request("/users/register", None)).await.unwrap();
        let anonymous_cookie = session_cookie(&response).unwrap();

        let form = registration_form("Biscoff Fan", &email, PASSWORD);
        let response = app
            .clone()
            .oneshot(form_request("/users/register", &form, Some(&anonymous_cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/dashboard"));
        let cookie = session_cookie(&response).unwrap();
        assert_ne!(cookie, anonymous_cookie, "session id must change on login");

        let response = app.clone().oneshot(get_request("/users/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"], "users/dashboard");
        assert_eq!(json["user"]["email"], email.as_str());
        assert_eq!(json["user"]["display_name"], "Biscoff Fan");

        let response = app.clone().oneshot(get_request("/users/register", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/dashboard"));

        let response = app
            .clone()
            .oneshot(form_request("/users/logout", &[], Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/login"));
        assert!(set_cookie_header(&response).contains("Max-Age=0"));

        let response = app.oneshot(get_request("/users/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/login"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_dashboard_redirects_anonymous_visitor(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());

        let response = app.oneshot(get_request("/users/dashboard", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/login"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_duplicate_email(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());
        let email = unique_email();
        insert_user(&init_test_app_state, "First", &email, PASSWORD).await;

        let form = registration_form("Second", &email, PASSWORD);
        let response = app.oneshot(form_request("/users/register", &form, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[case("B", "Password123!")]
    #[case("  B ", "Password123!")]
    #[case("Biscoff Fan", "short")]
    #[case("Biscoff Fan", "password123!")]
    #[tokio::test]
    async fn test_register_invalid_fields(
        init_test_app_state: AppState,
        #[case] display_name: &str,
        #[case] password: &str,
    ) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());
        let email = unique_email();

        let form = registration_form(display_name, &email, password);
        let response = app.oneshot(form_request("/users/register", &form, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[rstest]
    #[tokio::test]
    async fn test_malformed_cookie_is_anonymous(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());

        let response = app
            .oneshot(get_request("/users/register", Some("app_session=not-a-session")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).unwrap();
        assert_ne!(cookie, "app_session=not-a-session");
        assert!(body_json(response).await["user"].is_null());
    }

    #[rstest]
    #[tokio::test]
    async fn test_expired_session_is_anonymous(init_test_app_state: AppState) {
        let app = create_app(init_test_app_state.config.as_ref(), init_test_app_state.clone());
        let email = unique_email();
        let user = insert_user(&init_test_app_state, "Sleepy", &email, PASSWORD).await;
        let stale = Session::authenticated(user.to_ref(), Utc::now());
        init_test_app_state
            .sessions
            .set(&stale, chrono::Duration::zero())
            .await
            .unwrap();
        let cookie = format!("app_session={}", stale.id);

        let response = app.oneshot(get_request("/users/dashboard", Some(&cookie))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), Some("/users/login"));
        assert_ne!(session_cookie(&response), Some(cookie));
    }
}
