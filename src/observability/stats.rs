//! Per-route request counters.

use std::collections::BTreeMap;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use serde::Serialize;

use crate::http::server::AppState;

/// Counters for one `METHOD route` pair.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RouteStats {
    pub hits: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}

/// Registry of request counters, shared across handlers.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    routes: DashMap<String, RouteStats>,
}

/// Snapshot of the registry as served by the stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total_hits: u64,
    pub routes: BTreeMap<String, RouteStats>,
}

impl StatsRegistry {
    pub fn record(&self, method: &str, route: &str, status: u16) {
        let key = format!("{method} {route}");
        let mut entry = self.routes.entry(key).or_default();
        entry.hits += 1;
        match status {
            400..=499 => entry.client_errors += 1,
            500..=599 => entry.server_errors += 1,
            _ => {}
        }
    }

    pub fn report(&self) -> StatsReport {
        let routes: BTreeMap<String, RouteStats> = self
            .routes
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let total_hits = routes.values().map(|r| r.hits).sum();

        StatsReport { total_hits, routes }
    }
}

/// Middleware recording one counter tick per handled request.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    state
        .stats
        .record(&method, &route, response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_route() {
        let registry = StatsRegistry::default();
        registry.record("GET", "/api/v1/locations", 200);
        registry.record("GET", "/api/v1/locations", 200);
        registry.record("GET", "/api/v1/locations", 404);
        registry.record("POST", "/api/v1/webhook", 500);

        let report = registry.report();
        assert_eq!(report.total_hits, 4);

        let locations = &report.routes["GET /api/v1/locations"];
        assert_eq!(locations.hits, 3);
        assert_eq!(locations.client_errors, 1);
        assert_eq!(locations.server_errors, 0);

        let webhook = &report.routes["POST /api/v1/webhook"];
        assert_eq!(webhook.server_errors, 1);
    }
}
