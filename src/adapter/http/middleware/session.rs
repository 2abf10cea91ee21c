use crate::{
    adapter::http::extractors::session::{CurrentUser, SessionContext},
    application::{
        app_error::AppResult, dto::session::ResolveSessionDTO, interactors::session::ResolveSessionInteractor,
    },
    domain::current_user::project_current_user,
    infra::config::{AppConfig, SessionConfig},
};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::SET_COOKIE},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Runs for every request: resolves (or issues) the session, projects the
/// current user, and re-issues the cookie on the way out so the client's
/// expiry slides with the server-side record.
pub async fn session_middleware(
    State(config): State<Arc<AppConfig>>,
    interactor: ResolveSessionInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let config_session = &config.session;
    let dto = ResolveSessionDTO {
        session_id: extract_session_id(&request, &config_session.cookie_name),
        idle_timeout: config_session.idle_timeout,
    };
    let resolved = interactor.execute(dto).await?;
    if resolved.is_new {
        debug!(path = %request.uri().path(), "Issued anonymous session {}", resolved.session.id);
    }

    let current_user = CurrentUser(project_current_user(Some(&resolved.session)));
    let context = SessionContext::new(resolved.session);
    request.extensions_mut().insert(current_user);
    request.extensions_mut().insert(context.clone());

    let mut response = next.run(request).await;

    let cookie = match context.current().await {
        Some(session) => build_session_cookie(&session.id.to_string(), config_session),
        None => build_logout_cookie(config_session),
    };
    response.headers_mut().append(SET_COOKIE, HeaderValue::from_str(&cookie)?);
    Ok(response)
}

fn extract_session_id(request: &Request, cookie_name: &str) -> Option<String> {
    let prefix = format!("{}=", cookie_name);
    request
        .headers()
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()).map(str::to_string))
}

pub fn build_session_cookie(session_id: &str, config: &SessionConfig) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    let http_only = if config.cookie_http_only { "; HttpOnly" } else { "" };
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}{}",
        config.cookie_name, session_id, config.idle_timeout, secure, http_only
    )
}

pub fn build_logout_cookie(config: &SessionConfig) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", config.cookie_name)
}
