//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! Request
//!     → server.rs (router assembly, layers: trace, request id)
//!     → auth middleware (HTML redirect / JSON 401)
//!     → pages.rs (HTML via askama) or api.rs (JSON)
//!     → store / seasons reads, error.rs on failure
//! ```
//!
//! # Design Decisions
//! - One route group per response style: HTML pages and `/api/v1` JSON
//! - Errors render as `{status, message}` JSON under `/api`, as the HTML
//!   error page everywhere else
//! - Handlers receive everything through `AppState`; no globals

pub mod api;
pub mod error;
pub mod pages;
pub mod server;
pub mod views;

pub use server::{AppState, HttpServer};
