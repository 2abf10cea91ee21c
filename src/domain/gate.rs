//! Route access control.
//!
//! Guards are pure predicates over the resolved session of a request. A route
//! registers an ordered list of guards; the first one that does not allow the
//! request decides where the client is sent instead.

use crate::domain::entities::session::Session;

pub const DASHBOARD_PATH: &str = "/users/dashboard";
pub const LOGIN_PATH: &str = "/users/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    Redirect(&'static str),
}

impl Outcome {
    pub fn is_allow(&self) -> bool {
        matches!(self, Outcome::Allow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Only visitors without a logged-in user (register, login).
    GuestOnly,
    /// Only requests carrying a logged-in user (dashboard, logout).
    AuthenticatedOnly,
}

impl Guard {
    pub fn evaluate(self, session: Option<&Session>) -> Outcome {
        match self {
            Guard::GuestOnly => guest_only(session),
            Guard::AuthenticatedOnly => authenticated_only(session),
        }
    }
}

pub fn guest_only(session: Option<&Session>) -> Outcome {
    match session {
        Some(session) if session.is_authenticated() => Outcome::Redirect(DASHBOARD_PATH),
        _ => Outcome::Allow,
    }
}

pub fn authenticated_only(session: Option<&Session>) -> Outcome {
    match session {
        Some(session) if session.is_authenticated() => Outcome::Allow,
        _ => Outcome::Redirect(LOGIN_PATH),
    }
}

pub fn evaluate_guards(guards: &[Guard], session: Option<&Session>) -> Outcome {
    guards
        .iter()
        .map(|guard| guard.evaluate(session))
        .find(|outcome| !outcome.is_allow())
        .unwrap_or(Outcome::Allow)
}
