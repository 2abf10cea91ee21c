use axum::{
    extract::Request,
    http::{StatusCode, header::LOCATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::adapter::http::extractors::session::SessionContext;
use crate::domain::gate::{evaluate_guards, Guard, Outcome};

pub async fn guest_only_middleware(request: Request, next: Next) -> Response {
    enforce(&[Guard::GuestOnly], request, next).await
}

pub async fn authenticated_only_middleware(request: Request, next: Next) -> Response {
    enforce(&[Guard::AuthenticatedOnly], request, next).await
}

/// Runs `guards` against the request's session and either hands the
/// untouched request to the next handler or answers with a redirect.
pub async fn enforce(guards: &[Guard], request: Request, next: Next) -> Response {
    let context = request.extensions().get::<SessionContext>().cloned();
    let session = match context {
        Some(context) => context.current().await,
        None => None,
    };
    match evaluate_guards(guards, session.as_ref()) {
        Outcome::Allow => next.run(request).await,
        Outcome::Redirect(target) => {
            debug!(path = %request.uri().path(), redirect_to = target, "Guard redirected request");
            redirect_found(target)
        }
    }
}

/// `302 Found` to `target`.
pub fn redirect_found(target: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, target)]).into_response()
}
