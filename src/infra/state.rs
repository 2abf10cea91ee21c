use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::application::app_error::AppError;
use crate::application::interactors::auth::LoginInteractor;
use crate::application::interactors::session::{
    EstablishSessionInteractor, ResolveSessionInteractor, TerminateSessionInteractor,
};
use crate::application::interactors::users::CreateUserInteractor;
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::gateway::session::SessionStore;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub hasher: Arc<dyn CredentialsHasher>,
    pub sessions: Arc<dyn SessionStore>,
    pub user_reader: Arc<dyn UserReader>,
    pub user_writer: Arc<dyn UserWriter>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

pub trait FromAppState: Sized {
    fn from_app_state(state: &AppState) -> Self;
}

impl FromAppState for CreateUserInteractor {
    fn from_app_state(state: &AppState) -> Self {
        CreateUserInteractor::new(state.user_reader.clone(), state.user_writer.clone(), state.hasher.clone())
    }
}

impl FromAppState for LoginInteractor {
    fn from_app_state(state: &AppState) -> Self {
        LoginInteractor::new(state.user_reader.clone(), state.hasher.clone())
    }
}

impl FromAppState for ResolveSessionInteractor {
    fn from_app_state(state: &AppState) -> Self {
        ResolveSessionInteractor::new(state.sessions.clone())
    }
}

impl FromAppState for EstablishSessionInteractor {
    fn from_app_state(state: &AppState) -> Self {
        EstablishSessionInteractor::new(state.sessions.clone())
    }
}

impl FromAppState for TerminateSessionInteractor {
    fn from_app_state(state: &AppState) -> Self {
        TerminateSessionInteractor::new(state.sessions.clone())
    }
}

/// Lets handlers and middleware take any interactor as an extractor argument.
macro_rules! interactor_extractor {
    ($($interactor:ty),+ $(,)?) => {
        $(
            impl<S> FromRequestParts<S> for $interactor
            where
                S: Send + Sync,
                AppState: FromRef<S>,
            {
                type Rejection = AppError;

                async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                    let app_state = AppState::from_ref(state);
                    Ok(<$interactor>::from_app_state(&app_state))
                }
            }
        )+
    };
}

interactor_extractor!(
    CreateUserInteractor,
    LoginInteractor,
    ResolveSessionInteractor,
    EstablishSessionInteractor,
    TerminateSessionInteractor,
);
