//! Pasture — a member-gated directory of accountable food producers.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                  PASTURE                   │
//!                      │                                            │
//!   Browser / API      │  ┌────────┐   ┌──────────┐   ┌─────────┐  │
//!   ───────────────────┼─▶│  auth  │──▶│   http   │──▶│  store  │  │
//!                      │  │ gate   │   │ handlers │   │snapshot │  │
//!                      │  └────────┘   └──────────┘   └────┬────┘  │
//!                      │                                    │       │
//!                      │                 ┌──────────┐       │       │
//!   Headless CMS  ◀────┼─────────────────│   cms    │◀──────┘       │
//!                      │   poll / fetch  │  client  │   refresh     │
//!                      │                 └──────────┘               │
//!                      │                                            │
//!                      │  ┌──────────────────────────────────────┐  │
//!                      │  │        Cross-Cutting Concerns        │  │
//!                      │  │  config · seasons · observability    │  │
//!                      │  │          lifecycle (shutdown)        │  │
//!                      │  └──────────────────────────────────────┘  │
//!                      └────────────────────────────────────────────┘
//! ```
//!
//! Content flows one way: a background poller (and the CMS webhook) publish
//! immutable snapshots into the store; request handlers only ever read the
//! current snapshot.

// Core subsystems
pub mod cms;
pub mod config;
pub mod http;
pub mod store;

// Domain data
pub mod seasons;

// Cross-cutting concerns
pub mod auth;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
