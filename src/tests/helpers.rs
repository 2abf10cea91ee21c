#![cfg(test)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::infra::state::AppState;

pub const PASSWORD: &str = "Password123!";

pub fn unique_email() -> String {
    let id = Uuid::now_v7().as_simple().to_string();
    format!("{}@test.example", &id[..16])
}

/// Stores a user straight through the gateway, skipping the HTTP flow.
pub async fn insert_user(state: &AppState, display_name: &str, email: &str, password: &str) -> User {
    let hashed = state.hasher.hash_password(password).await.expect("hash password");
    let user = User::new(display_name.to_string(), email.to_string(), hashed);
    state.user_writer.insert(user.clone()).await.expect("insert user");
    user
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, form: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let body = form
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

/// `name=value` pair of the first `Set-Cookie` header, ready to be sent back.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub fn set_cookie_header<B>(response: &Response<B>) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|value| value.to_str().ok())
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn delete_user(pool: &PgPool, email: &str) {
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await
        .expect("delete user");
}

pub async fn delete_session(pool: &PgPool, session_id: Uuid) {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await
        .expect("delete session");
}
