//! JSON API handlers (`/api/v1`).

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::cms::{topics, WebhookPayload};
use crate::http::error::json_error;
use crate::http::server::AppState;
use crate::seasons;
use crate::store::WebhookError;

#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    tags: Option<String>,
    standards: Option<String>,
}

/// Locations, optionally narrowed by comma-separated `standards` and `tags`
/// slugs. Empty criteria are no constraint.
pub async fn locations(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> Response {
    let standards = split_csv(query.standards);
    let tags = split_csv(query.tags);

    Json(state.store.filter(&standards, &tags)).into_response()
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn foods(State(state): State<AppState>) -> Response {
    Json(state.seasons.foods()).into_response()
}

pub async fn foods_by_season(
    State(state): State<AppState>,
    Path(season): Path<String>,
) -> Response {
    match parse_season(&season) {
        Some(season) => Json(state.seasons.by_season(season)).into_response(),
        None => json_error(StatusCode::BAD_REQUEST, "Invalid season"),
    }
}

pub async fn foods_by_state(
    State(state): State<AppState>,
    Path(state_code): Path<String>,
) -> Response {
    Json(state.seasons.by_state(&state_code)).into_response()
}

pub async fn foods_by_state_and_season(
    State(state): State<AppState>,
    Path((state_code, season)): Path<(String, String)>,
) -> Response {
    let Some(season) = parse_season(&season) else {
        return json_error(StatusCode::BAD_REQUEST, "Invalid season");
    };
    if !state.seasons.is_valid_state(&state_code) {
        return json_error(StatusCode::BAD_REQUEST, "Invalid state");
    }

    Json(state.seasons.by_state_and_season(&state_code, season)).into_response()
}

fn parse_season(raw: &str) -> Option<u8> {
    raw.parse().ok().filter(|s| seasons::is_valid_season(*s))
}

/// CMS entry-change callback. The event topic arrives in a request header;
/// the body is the CMS's own payload shape.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(topic) = headers.get(topics::HEADER).and_then(|v| v.to_str().ok()) else {
        return json_error(StatusCode::BAD_REQUEST, "Missing webhook topic");
    };

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(%error, "Webhook payload decode failed");
            return json_error(StatusCode::BAD_REQUEST, "Invalid webhook payload");
        }
    };

    match state.store.apply_webhook(topic, &payload).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": 200, "message": "ok" })),
        )
            .into_response(),
        Err(WebhookError::Cms(error)) => {
            tracing::warn!(%error, id = %payload.sys.id, "Webhook entry fetch failed");
            json_error(StatusCode::BAD_GATEWAY, "Entry fetch failed")
        }
        Err(error) => json_error(StatusCode::BAD_REQUEST, &error.to_string()),
    }
}

pub async fn stats(State(state): State<AppState>) -> Response {
    Json(state.stats.report()).into_response()
}
