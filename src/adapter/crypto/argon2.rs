use crate::application::{
    app_error::{AppError, AppResult},
    interface::crypto::CredentialsHasher,
};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;

#[derive(Default, Clone)]
pub struct ArgonPasswordHasher {
    hasher: Argon2<'static>,
}

impl ArgonPasswordHasher {
    /// Argon2 is deliberately slow, keep it off the async workers.
    async fn run_blocking<T, F>(&self, job: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Argon2<'static>) -> AppResult<T> + Send + 'static,
    {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || job(hasher))
            .await
            .map_err(|_| AppError::PasswordHashError)?
    }
}

#[async_trait]
impl CredentialsHasher for ArgonPasswordHasher {
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        self.run_blocking(move |hasher| {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|_| AppError::PasswordHashError)
        })
        .await
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        self.run_blocking(move |hasher| {
            let parsed_hash = PasswordHash::new(&hashed).map_err(|_| AppError::InvalidCredentials)?;
            Ok(hasher.verify_password(password.as_bytes(), &parsed_hash).is_ok())
        })
        .await
    }
}
