//! HTML page handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::session_cookie;
use crate::http::error::html_error;
use crate::http::server::AppState;
use crate::http::views::{
    render_template, FoodItemsView, HomeView, LocationView, LocationsView, LoginView,
};
use crate::seasons::{self, SEASONS_PER_YEAR};

pub async fn home(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot();
    let locations = snapshot.all_locations();

    let locations_json = serde_json::to_string(&locations).unwrap_or_else(|error| {
        tracing::error!(%error, "Failed to serialize locations for the map");
        "[]".to_string()
    });

    let view = HomeView {
        locations,
        standards: snapshot.standards_sorted(),
        tags: snapshot.tags_sorted(),
        states: state.seasons.valid_states(),
        seasons: (1..=SEASONS_PER_YEAR).collect(),
        locations_json,
        mapbox_token: state.config.mapbox_token.clone(),
    };
    render_template(&view, StatusCode::OK)
}

pub async fn locations(State(state): State<AppState>) -> Response {
    let view = LocationsView {
        locations: state.store.snapshot().all_locations(),
    };
    render_template(&view, StatusCode::OK)
}

pub async fn location(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.store.get(&slug) {
        Some(location) => render_template(&LocationView { location }, StatusCode::OK),
        None => html_error(StatusCode::NOT_FOUND, "Page not found"),
    }
}

#[derive(Debug, Deserialize)]
pub struct FoodsQuery {
    state: Option<String>,
    season: Option<String>,
}

/// Fragment listing in-season and next-season foods. Without both query
/// params (or with an unparseable season) the lists are simply empty.
pub async fn foods(State(state): State<AppState>, Query(query): Query<FoodsQuery>) -> Response {
    let (in_season, next_season) = match (query.state, parse_season(query.season)) {
        (Some(state_code), Some(season)) => (
            state.seasons.by_state_and_season(&state_code, season),
            state
                .seasons
                .by_state_and_season(&state_code, seasons::next_season(season)),
        ),
        _ => (Vec::new(), Vec::new()),
    };

    let view = FoodItemsView {
        in_season,
        next_season,
    };
    render_template(&view, StatusCode::OK)
}

fn parse_season(raw: Option<String>) -> Option<u8> {
    raw?.parse().ok().filter(|s| seasons::is_valid_season(*s))
}

pub async fn login_form() -> Response {
    render_template(&LoginView, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    password: String,
}

/// Hash the submitted password; a match sets the session cookie and sends
/// the member home, a mismatch sends them back to the form.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = state.gatekeeper.hash_value(&form.password);

    if !state.gatekeeper.is_valid(&token) {
        return Redirect::to("/login").into_response();
    }

    let mut response = Redirect::to("/").into_response();
    if let Ok(value) = HeaderValue::from_str(&session_cookie(&token)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}
