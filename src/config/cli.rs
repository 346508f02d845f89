//! Command-line and environment argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::Mode;

/// Command-line arguments for the Pasture binary.
///
/// Every flag can also be supplied through the environment, which is how the
/// deployed service is configured.
#[derive(Debug, Parser)]
#[command(name = "pasture", version, about = "Member-gated directory of accountable food producers")]
pub struct CliArgs {
    /// Shared site password.
    #[arg(long, env = "PASTURE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Salt appended to the password before hashing.
    #[arg(long, env = "PASTURE_SALT", hide_env_values = true)]
    pub salt: String,

    /// Mapbox token for the home-page map.
    #[arg(long, env = "MAPBOX_TOKEN", hide_env_values = true)]
    pub mapbox_token: String,

    /// HTTP listen port.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Deployment mode.
    #[arg(long, env = "PASTURE_MODE", value_enum, default_value_t = Mode::Development)]
    pub mode: Mode,

    /// Base URL of the CMS delivery API.
    #[arg(long, env = "CMS_BASE_URL")]
    pub cms_base_url: String,

    /// CMS space identifier.
    #[arg(long, env = "CMS_SPACE_ID")]
    pub cms_space_id: String,

    /// CMS environment within the space.
    #[arg(long, env = "CMS_ENVIRONMENT", default_value = "master")]
    pub cms_environment: String,

    /// CMS delivery access token.
    #[arg(long, env = "CMS_ACCESS_TOKEN", hide_env_values = true)]
    pub cms_access_token: String,

    /// Seconds between background content refreshes.
    #[arg(long, env = "PASTURE_REFRESH_INTERVAL_SECS", default_value_t = 10)]
    pub refresh_interval_secs: u64,

    /// Directory served under /public.
    #[arg(long, env = "PASTURE_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Cloudflare API token for the startup cache purge.
    #[arg(long, env = "CLOUDFLARE_TOKEN", hide_env_values = true)]
    pub cloudflare_token: Option<String>,

    /// Cloudflare purge endpoint URL.
    #[arg(long, env = "CLOUDFLARE_CACHE_URL")]
    pub cloudflare_cache_url: Option<String>,
}
