//! Shared utilities for integration testing.
//!
//! Boots the real server against a programmable stub CMS that speaks the
//! delivery-API shapes the client expects.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use pasture::auth::Gatekeeper;
use pasture::cms::CmsClient;
use pasture::config::{self, CliArgs, Mode};
use pasture::http::HttpServer;
use pasture::lifecycle::Shutdown;
use pasture::seasons::SeasonalIndex;
use pasture::store::LocationStore;

pub const PASSWORD: &str = "grass-fed";
pub const SALT: &str = "sea-salt";

/// In-memory CMS double: content type → entry values.
#[derive(Clone, Default)]
pub struct StubCms {
    entries: Arc<Mutex<HashMap<String, Vec<Value>>>>,
}

impl StubCms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, content_type: &str, items: Vec<Value>) {
        self.entries
            .lock()
            .unwrap()
            .insert(content_type.to_string(), items);
    }

    #[allow(dead_code)]
    pub fn push(&self, content_type: &str, item: Value) {
        self.entries
            .lock()
            .unwrap()
            .entry(content_type.to_string())
            .or_default()
            .push(item);
    }

    /// Serve the stub on an ephemeral port and return its address.
    pub async fn serve(&self) -> SocketAddr {
        let router = Router::new()
            .route(
                "/spaces/{space}/environments/{env}/entries",
                get(list_entries),
            )
            .route(
                "/spaces/{space}/environments/{env}/entries/{id}",
                get(single_entry),
            )
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}

async fn list_entries(
    State(stub): State<StubCms>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let items = params
        .get("content_type")
        .and_then(|ct| stub.entries.lock().unwrap().get(ct).cloned())
        .unwrap_or_default();
    Json(json!({ "items": items }))
}

async fn single_entry(
    State(stub): State<StubCms>,
    Path((_space, _env, id)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let entries = stub.entries.lock().unwrap();
    let found = params
        .get("content_type")
        .and_then(|ct| entries.get(ct))
        .and_then(|items| items.iter().find(|item| item["sys"]["id"] == json!(id)));

    match found {
        Some(item) => Json(item.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not found" })),
        )
            .into_response(),
    }
}

/// A running application instance pointed at a stub CMS.
pub struct TestApp {
    pub base: String,
    /// A valid session token for the shared password.
    pub token: String,
    // dropped with the app, which stops the server
    _shutdown: Shutdown,
}

pub async fn spawn_app(cms_addr: SocketAddr) -> TestApp {
    let config = config::build(CliArgs {
        password: PASSWORD.into(),
        salt: SALT.into(),
        mapbox_token: "pk.test".into(),
        port: 8080,
        mode: Mode::Development,
        cms_base_url: format!("http://{cms_addr}"),
        cms_space_id: "space-test".into(),
        cms_environment: "master".into(),
        cms_access_token: "stub-token".into(),
        refresh_interval_secs: 3600,
        public_dir: PathBuf::from("public"),
        cloudflare_token: None,
        cloudflare_cache_url: None,
    })
    .expect("test config is valid");
    let config = Arc::new(config);

    let store = Arc::new(LocationStore::new(CmsClient::new(config.cms.clone())));
    store.refresh().await;

    let seasons = Arc::new(SeasonalIndex::from_embedded().unwrap());
    let server = HttpServer::new(config, store, seasons);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp {
        base: format!("http://{addr}"),
        token: Gatekeeper::new(PASSWORD, SALT).hash_value(PASSWORD),
        _shutdown: shutdown,
    }
}

/// Client that does not follow redirects, so login/auth redirects are
/// observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub fn taxonomy_entry(id: &str, title: &str, slug: &str) -> Value {
    json!({
        "sys": { "id": id },
        "fields": { "title": title, "slug": slug }
    })
}

pub fn location_entry(id: &str, name: &str, slug: &str, standard: &str, tags: &[&str]) -> Value {
    json!({
        "sys": { "id": id },
        "fields": {
            "name": name,
            "slug": slug,
            "url": format!("https://{slug}.example"),
            "shortDescription": format!("{name} sells directly"),
            "coordinates": { "lat": 41.2, "lon": -73.9 },
            "standard": { "sys": { "id": standard } },
            "tags": tags
                .iter()
                .map(|t| json!({ "sys": { "id": t } }))
                .collect::<Vec<_>>()
        }
    })
}

/// A stub seeded with two standards, two tags and three locations.
pub fn seeded_cms() -> StubCms {
    let cms = StubCms::new();
    cms.set(
        "standard",
        vec![
            taxonomy_entry("std-gold", "Gold", "gold"),
            taxonomy_entry("std-silver", "Silver", "silver"),
        ],
    );
    cms.set(
        "tag",
        vec![
            taxonomy_entry("tag-beef", "Beef", "beef"),
            taxonomy_entry("tag-dairy", "Dairy", "dairy"),
        ],
    );
    cms.set(
        "location",
        vec![
            location_entry("l1", "Alder Farm", "alder-farm", "std-gold", &["tag-beef"]),
            location_entry("l2", "Briar Dairy", "briar-dairy", "std-silver", &["tag-dairy"]),
            location_entry(
                "l3",
                "Cedar Ranch",
                "cedar-ranch",
                "std-gold",
                &["tag-beef", "tag-dairy"],
            ),
        ],
    );
    cms
}
