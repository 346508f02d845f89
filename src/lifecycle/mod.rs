//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init tracing → Build store → Initial refresh
//!     → Spawn poller → Start HTTP server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to tasks → drain server → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then content, listener last
//! - Every long-running task holds a shutdown receiver; none outlive
//!   the coordinator

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
