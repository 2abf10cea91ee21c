use axum::{response::Html, Json};
use utoipa::{
    openapi::{
        security::{ApiKey, ApiKeyValue, SecurityScheme},
        OpenApi as OpenApiDoc,
    },
    Modify, OpenApi,
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{auth, user},
    schema::{
        auth::LoginRequest,
        page::{PageResponse, UserResponse},
        user::CreateUserRequest,
        ValidPassword,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookieAuth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("app_session"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        user::show_registration_form,
        user::register,
        user::dashboard,
        auth::show_login_form,
        auth::login,
        auth::logout
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest,
            CreateUserRequest,
            PageResponse,
            UserResponse,
            ValidPassword
        )
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Biscoff Bakery API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/users/register", "/users/login", "/users/dashboard", "/users/logout"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
