use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{id::Id, user::User};

/// Snapshot of an authenticated principal, owned by the session that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Id<User>,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Id<Session>,
    pub user: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl Session {
    pub fn anonymous(now: DateTime<Utc>) -> Self {
        Self {
            id: Id::random(),
            user: None,
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn authenticated(user: UserRef, now: DateTime<Utc>) -> Self {
        Self {
            user: Some(user),
            ..Self::anonymous(now)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_expired(&self, idle_timeout: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_accessed_at >= idle_timeout
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_ref() -> UserRef {
        UserRef {
            id: Id::generate(),
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
        }
    }

    #[test]
    fn test_anonymous_session_has_no_user() {
        let session = Session::anonymous(Utc::now());
        assert!(!session.is_authenticated());
        assert_eq!(session.created_at, session.last_accessed_at);
    }

    #[test]
    fn test_authenticated_session_gets_fresh_id() {
        let now = Utc::now();
        let first = Session::authenticated(user_ref(), now);
        let second = Session::authenticated(user_ref(), now);
        assert!(first.is_authenticated());
        assert_ne!(first.id, second.id);
    }

    #[rstest]
    #[case(0, false)]
    #[case(3_599, false)]
    #[case(3_600, true)]
    #[case(7_200, true)]
    fn test_is_expired_after_idle_window(#[case] idle_secs: i64, #[case] expired: bool) {
        let now = Utc::now();
        let mut session = Session::anonymous(now - Duration::seconds(10_000));
        session.touch(now - Duration::seconds(idle_secs));
        assert_eq!(session.is_expired(Duration::seconds(3_600), now), expired);
    }
}
