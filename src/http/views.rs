//! Askama view structs for the HTML pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::seasons::Food;
use crate::store::{Location, Standard, Tag};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeView {
    pub locations: Vec<Location>,
    pub standards: Vec<Standard>,
    pub tags: Vec<Tag>,
    pub states: Vec<String>,
    pub seasons: Vec<u8>,
    /// The locations list pre-serialized for the map script.
    pub locations_json: String,
    pub mapbox_token: String,
}

#[derive(Template)]
#[template(path = "locations.html")]
pub struct LocationsView {
    pub locations: Vec<Location>,
}

#[derive(Template)]
#[template(path = "location.html")]
pub struct LocationView {
    pub location: Location,
}

/// Fragment listing what is in season now and in the next half-month.
#[derive(Template)]
#[template(path = "food_items.html")]
pub struct FoodItemsView {
    pub in_season: Vec<Food>,
    pub next_season: Vec<Food>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginView;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub status: u16,
    pub message: String,
}

/// Render a template to a response, downgrading render failures to a plain
/// 500 so a broken template never takes a handler down.
pub fn render_template<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(error) => {
            tracing::error!(%error, "Template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Template rendering failed",
            )
                .into_response()
        }
    }
}
