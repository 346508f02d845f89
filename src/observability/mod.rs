//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured request logging (tower-http TraceLayer, request IDs)
//! - Per-route request counters, served back at `/api/v1/stats`
//!
//! # Design Decisions
//! - Counters key on the matched route template, not the raw path, so
//!   cardinality stays bounded
//! - The registry is readable in-process because the stats endpoint serves
//!   it; an external metrics exporter is deliberately not part of this
//!   surface

pub mod stats;

pub use stats::{RouteStats, StatsRegistry};
