//! Configuration schema definitions.
//!
//! This module defines the validated configuration structure for the
//! application. Raw values arrive through [`crate::config::cli::CliArgs`];
//! these types only exist post-validation.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Deployment mode. Release tightens caching and purges the CDN at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Development,
    Release,
}

impl Mode {
    pub fn is_release(self) -> bool {
        matches!(self, Mode::Release)
    }
}

/// Coordinates of the headless CMS delivery API.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Base URL of the delivery API (e.g. "https://cdn.contentful.com").
    pub base_url: Url,

    /// Space identifier.
    pub space_id: String,

    /// Environment within the space (e.g. "master").
    pub environment: String,

    /// Delivery access token, sent as a query parameter.
    pub access_token: String,
}

/// Optional CDN purge credentials, used once at Release startup.
#[derive(Debug, Clone)]
pub struct CloudflareConfig {
    pub token: String,
    pub cache_url: String,
}

/// Root application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared site password (hashed with the salt at startup).
    pub password: String,

    /// Salt appended to the password before hashing.
    pub salt: String,

    /// Mapbox token handed to the home-page map script.
    pub mapbox_token: String,

    /// HTTP listen port.
    pub port: u16,

    pub mode: Mode,

    pub cms: CmsConfig,

    /// Cadence of the background content refresh.
    pub refresh_interval: Duration,

    /// Directory served under `/public`.
    pub public_dir: PathBuf,

    pub cloudflare: Option<CloudflareConfig>,
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
