//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, auth, stats)
//! - Serve static assets (year-long cache headers in Release mode)
//! - Run with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Upper bound on any single request, webhook entry fetches included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

use crate::auth::{self, Gatekeeper};
use crate::config::AppConfig;
use crate::http::error::{html_error, json_error};
use crate::http::{api, pages};
use crate::observability::stats::{self, StatsRegistry};
use crate::seasons::SeasonalIndex;
use crate::store::LocationStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocationStore>,
    pub gatekeeper: Arc<Gatekeeper>,
    pub seasons: Arc<SeasonalIndex>,
    pub stats: Arc<StatsRegistry>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for the site and the JSON API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<LocationStore>,
        seasons: Arc<SeasonalIndex>,
    ) -> Self {
        let gatekeeper = Arc::new(Gatekeeper::new(&config.password, &config.salt));

        let state = AppState {
            store,
            gatekeeper,
            seasons,
            stats: Arc::new(StatsRegistry::default()),
            config,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    fn build_router(state: AppState) -> Router {
        let html = Router::new()
            .route("/", get(pages::home))
            .route("/locations", get(pages::locations))
            .route("/locations/{slug}", get(pages::location))
            .route("/foods", get(pages::foods))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth_html,
            ));

        // stats is added before auth so it sits inside it: rejected
        // requests never reach the counters, matching the stats endpoint's
        // "authenticated traffic only" report
        let api = Router::new()
            .route("/locations", get(api::locations))
            .route("/foods", get(api::foods))
            .route("/seasons/{season}", get(api::foods_by_season))
            .route("/states/{state}", get(api::foods_by_state))
            .route(
                "/states/{state}/seasons/{season}",
                get(api::foods_by_state_and_season),
            )
            .route("/webhook", post(api::webhook))
            .route("/stats", get(api::stats))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                stats::track_requests,
            ))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth_json,
            ));

        let router = Router::new()
            .route("/health", get(health))
            .route("/login", get(pages::login_form).post(pages::login_submit))
            .merge(html)
            .nest("/api/v1", api)
            .fallback(not_found);

        let router = if state.config.mode.is_release() {
            router.nest_service(
                "/public",
                ServiceBuilder::new()
                    .layer(SetResponseHeaderLayer::overriding(
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("public, max-age=31536000"),
                    ))
                    .service(ServeDir::new(&state.config.public_dir)),
            )
        } else {
            router.nest_service("/public", ServeDir::new(&state.config.public_dir))
        };

        router
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(CompressionLayer::new())
                    .layer(TimeoutLayer::with_status_code(
                        axum::http::StatusCode::REQUEST_TIMEOUT,
                        REQUEST_TIMEOUT,
                    )),
            )
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

/// 404 handler: JSON under `/api`, the HTML error page elsewhere.
async fn not_found(uri: axum::http::Uri) -> Response {
    if uri.path().starts_with("/api") {
        json_error(axum::http::StatusCode::NOT_FOUND, "Page not found")
    } else {
        html_error(axum::http::StatusCode::NOT_FOUND, "Page not found")
    }
}
