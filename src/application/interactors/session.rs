use crate::{
    application::{
        app_error::{AppError, AppResult},
        dto::session::{ResolveSessionDTO, ResolvedSessionDTO},
        interface::gateway::session::SessionStore,
    },
    domain::entities::{
        id::Id,
        session::{Session, UserRef},
    },
};
use chrono::{Duration, Utc};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

fn idle_window(idle_timeout: i64) -> AppResult<Duration> {
    Duration::try_seconds(idle_timeout)
        .ok_or_else(|| AppError::Internal(format!("idle timeout of {} seconds is out of range", idle_timeout)))
}

/// Turns the cookie of an inbound request into a live session, issuing a new
/// anonymous one when the cookie is missing, malformed, unknown or expired.
/// Every successful resolution slides the inactivity window forward.
#[derive(Clone)]
pub struct ResolveSessionInteractor {
    store: Arc<dyn SessionStore>,
}

impl ResolveSessionInteractor {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, dto: ResolveSessionDTO) -> AppResult<ResolvedSessionDTO> {
        let idle_timeout = idle_window(dto.idle_timeout)?;
        let now = Utc::now();

        if let Some(mut session) = self.find_live(dto.session_id.as_deref(), idle_timeout).await? {
            session.touch(now);
            self.store.set(&session, idle_timeout).await?;
            return Ok(ResolvedSessionDTO { session, is_new: false });
        }

        let session = Session::anonymous(now);
        self.store.set(&session, idle_timeout).await?;
        Ok(ResolvedSessionDTO { session, is_new: true })
    }

    async fn find_live(&self, raw_id: Option<&str>, idle_timeout: Duration) -> AppResult<Option<Session>> {
        let Some(session_id) = raw_id.and_then(|raw| Id::<Session>::from_str(raw).ok()) else {
            return Ok(None);
        };
        let Some(session) = self.store.get(&session_id).await? else {
            return Ok(None);
        };
        if session.is_expired(idle_timeout, Utc::now()) {
            self.store.delete(&session_id).await?;
            debug!("Session {} expired", session_id);
            return Ok(None);
        }
        Ok(Some(session))
    }
}

/// Binds a user to the session. The previous id is always discarded so a
/// pre-login identifier can never carry an authenticated user.
#[derive(Clone)]
pub struct EstablishSessionInteractor {
    store: Arc<dyn SessionStore>,
}

impl EstablishSessionInteractor {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, current: Option<&Session>, user: UserRef, idle_timeout: i64) -> AppResult<Session> {
        let ttl = idle_window(idle_timeout)?;
        if let Some(current) = current {
            self.store.delete(&current.id).await?;
        }
        let user_id = user.id.clone();
        let session = Session::authenticated(user, Utc::now());
        self.store.set(&session, ttl).await?;
        info!("Session established for user {}", user_id);
        Ok(session)
    }
}

#[derive(Clone)]
pub struct TerminateSessionInteractor {
    store: Arc<dyn SessionStore>,
}

impl TerminateSessionInteractor {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, current: &Session) -> AppResult<()> {
        self.store.delete(&current.id).await?;
        match &current.user {
            Some(user) => info!("User {} logged out", user.id),
            None => debug!("Anonymous session {} destroyed", current.id),
        }
        Ok(())
    }
}
