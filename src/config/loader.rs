//! Configuration assembly and semantic validation.
//!
//! clap handles the syntactic layer (types, required flags, env fallback);
//! this module checks the values make sense together and reports every
//! violation in one pass.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::config::cli::CliArgs;
use crate::config::schema::{AppConfig, CloudflareConfig, CmsConfig};

/// A single semantic configuration violation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("salt must not be empty")]
    EmptySalt,
    #[error("mapbox token must not be empty")]
    EmptyMapboxToken,
    #[error("listen port must be non-zero")]
    ZeroPort,
    #[error("refresh interval must be at least 1 second")]
    RefreshIntervalTooShort,
    #[error("CMS base URL is not a valid URL: {0}")]
    InvalidCmsBaseUrl(String),
    #[error("CMS space id must not be empty")]
    EmptyCmsSpace,
    #[error("CMS environment must not be empty")]
    EmptyCmsEnvironment,
    #[error("CMS access token must not be empty")]
    EmptyCmsToken,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration invalid: {}", format_violations(.0))]
    Validation(Vec<ValidationError>),
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse the process environment and CLI into a validated [`AppConfig`].
pub fn load() -> Result<AppConfig, ConfigError> {
    build(CliArgs::parse())
}

/// Assemble and validate a configuration from already-parsed arguments.
pub fn build(cli: CliArgs) -> Result<AppConfig, ConfigError> {
    let mut errors = Vec::new();

    if cli.password.trim().is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }
    if cli.salt.trim().is_empty() {
        errors.push(ValidationError::EmptySalt);
    }
    if cli.mapbox_token.trim().is_empty() {
        errors.push(ValidationError::EmptyMapboxToken);
    }
    if cli.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if cli.refresh_interval_secs == 0 {
        errors.push(ValidationError::RefreshIntervalTooShort);
    }
    if cli.cms_space_id.trim().is_empty() {
        errors.push(ValidationError::EmptyCmsSpace);
    }
    if cli.cms_environment.trim().is_empty() {
        errors.push(ValidationError::EmptyCmsEnvironment);
    }
    if cli.cms_access_token.trim().is_empty() {
        errors.push(ValidationError::EmptyCmsToken);
    }

    // the client later appends path segments, so opaque URLs like
    // "mailto:" must be rejected here as well
    let base_url = match Url::parse(&cli.cms_base_url) {
        Ok(url) if !url.cannot_be_a_base() => Some(url),
        _ => {
            errors.push(ValidationError::InvalidCmsBaseUrl(cli.cms_base_url.clone()));
            None
        }
    };

    let cloudflare = match (cli.cloudflare_token, cli.cloudflare_cache_url) {
        (Some(token), Some(cache_url)) => Some(CloudflareConfig { token, cache_url }),
        (None, None) => None,
        _ => {
            tracing::warn!("only one of CLOUDFLARE_TOKEN / CLOUDFLARE_CACHE_URL set; purge disabled");
            None
        }
    };

    match base_url {
        Some(base_url) if errors.is_empty() => Ok(AppConfig {
            password: cli.password,
            salt: cli.salt,
            mapbox_token: cli.mapbox_token,
            port: cli.port,
            mode: cli.mode,
            cms: CmsConfig {
                base_url,
                space_id: cli.cms_space_id,
                environment: cli.cms_environment,
                access_token: cli.cms_access_token,
            },
            refresh_interval: Duration::from_secs(cli.refresh_interval_secs),
            public_dir: cli.public_dir,
            cloudflare,
        }),
        _ => Err(ConfigError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Mode;
    use std::path::PathBuf;

    fn valid_cli() -> CliArgs {
        CliArgs {
            password: "hunter2".into(),
            salt: "pepper".into(),
            mapbox_token: "pk.test".into(),
            port: 8080,
            mode: Mode::Development,
            cms_base_url: "https://cdn.example.com".into(),
            cms_space_id: "space1".into(),
            cms_environment: "master".into(),
            cms_access_token: "tok".into(),
            refresh_interval_secs: 10,
            public_dir: PathBuf::from("public"),
            cloudflare_token: None,
            cloudflare_cache_url: None,
        }
    }

    #[test]
    fn valid_config_builds() {
        let config = build(valid_cli()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cms.space_id, "space1");
        assert!(config.cloudflare.is_none());
    }

    #[test]
    fn all_violations_reported_together() {
        let mut cli = valid_cli();
        cli.password = "".into();
        cli.salt = "  ".into();
        cli.cms_base_url = "not a url".into();

        let err = build(cli).unwrap_err();
        let ConfigError::Validation(errors) = err;
        assert!(errors.contains(&ValidationError::EmptyPassword));
        assert!(errors.contains(&ValidationError::EmptySalt));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidCmsBaseUrl(_))));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn opaque_base_url_is_rejected() {
        let mut cli = valid_cli();
        cli.cms_base_url = "mailto:team@example.com".into();

        let err = build(cli).unwrap_err();
        let ConfigError::Validation(errors) = err;
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidCmsBaseUrl(_))));
    }

    #[test]
    fn partial_cloudflare_credentials_disable_purge() {
        let mut cli = valid_cli();
        cli.cloudflare_token = Some("cf-token".into());

        let config = build(cli).unwrap();
        assert!(config.cloudflare.is_none());
    }
}
