//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables / CLI flags
//!     → cli.rs (clap parse & deserialize)
//!     → loader.rs (semantic checks, assembly)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - Validation separates syntactic (clap) from semantic checks
//! - All semantic violations are reported together, not just the first
//! - Misconfiguration is the only fatal startup condition

pub mod cli;
pub mod loader;
pub mod schema;

pub use cli::CliArgs;
pub use loader::{build, load, ConfigError, ValidationError};
pub use schema::{AppConfig, CloudflareConfig, CmsConfig, Mode};
