use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::sync::Mutex;

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::session::{Session, UserRef};

/// The session of the request being handled. Installed by the session
/// middleware, which reads it back after the handler to write the cookie.
/// `None` means the session was destroyed while handling the request.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(session))),
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.lock().await.clone()
    }

    pub async fn replace(&self, session: Session) {
        *self.inner.lock().await = Some(session);
    }

    pub async fn destroy(&self) {
        *self.inner.lock().await = None;
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session middleware is not installed on this route".to_string()))
    }
}

/// Template-visible `user`, projected once per request before any guard runs.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<UserRef>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned().unwrap_or_default())
    }
}
