//! Shared-password authentication.
//!
//! # Responsibilities
//! - Compute the salted password hash once at startup
//! - Validate session tokens (cookie `_token`, query-param fallback)
//! - Gate the HTML route group (redirect to /login) and the JSON route
//!   group (401 body) via axum middleware
//!
//! # Design Decisions
//! - The session token *is* the salted hash; there is no server-side session
//!   store and no expiry beyond the cookie's own Max-Age
//! - Successful requests re-issue the cookie, giving a sliding 24h window
//! - Plain string comparison; constant-time comparison is out of scope

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use sha2::{Digest, Sha256};

use crate::http::server::AppState;

/// Name of the session cookie (and of the query-param fallback).
pub const TOKEN_COOKIE: &str = "_token";

const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Holds the precomputed salted password hash and validates tokens.
pub struct Gatekeeper {
    password_hash: String,
    salt: String,
}

impl Gatekeeper {
    pub fn new(password: &str, salt: &str) -> Self {
        let mut gate = Gatekeeper {
            password_hash: String::new(),
            salt: salt.to_string(),
        };
        gate.password_hash = gate.hash_value(password);
        gate
    }

    /// `hex(sha256(value + salt))`, the session-token derivation.
    pub fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn is_valid(&self, token: &str) -> bool {
        !token.is_empty() && token == self.password_hash
    }
}

/// Build the `Set-Cookie` value for a session token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        TOKEN_COOKIE, token, COOKIE_MAX_AGE_SECS
    )
}

/// Pull the session token out of the cookie header, falling back to the
/// `_token` query parameter.
pub fn token_from_request(request: &Request<Body>) -> Option<String> {
    if let Some(token) = token_from_cookies(request) {
        return Some(token);
    }
    token_from_query(request)
}

fn token_from_cookies(request: &Request<Body>) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == TOKEN_COOKIE).then(|| value.to_string())
    })
}

fn token_from_query(request: &Request<Body>) -> Option<String> {
    let query = request.uri().query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == TOKEN_COOKIE)
        .map(|(_, value)| value.into_owned())
}

/// Middleware for the HTML route group: unauthenticated requests are
/// redirected to the login page.
pub async fn require_auth_html(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match token_from_request(&request) {
        Some(token) if state.gatekeeper.is_valid(&token) => {
            let mut response = next.run(request).await;
            refresh_cookie(&mut response, &token);
            response
        }
        _ => Redirect::to("/login").into_response(),
    }
}

/// Middleware for the JSON route group: unauthenticated requests get a 401.
pub async fn require_auth_json(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match token_from_request(&request) {
        Some(token) if state.gatekeeper.is_valid(&token) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Unauthorized" })),
        )
            .into_response(),
    }
}

fn refresh_cookie(response: &mut Response, token: &str) {
    if let Ok(value) = HeaderValue::from_str(&session_cookie(token)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
