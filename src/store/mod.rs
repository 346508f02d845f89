//! Location snapshot store.
//!
//! # Data Flow
//! ```text
//! Background poll (poller.rs):
//!     Periodic timer
//!     → store.refresh() fetches standards, tags, locations
//!     → snapshot.rs rebuilds an immutable Snapshot
//!     → atomic swap (ArcSwap)
//!
//! Webhook (store.rs::apply_webhook):
//!     Entry-change event
//!     → fetch or drop the single affected entry
//!     → patched Snapshot, atomic swap
//!
//! Request handlers:
//!     load the current Snapshot, linear scans / map lookups only
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable once published; writers rebuild and swap,
//!   readers never observe a map mid-replacement
//! - A failed or empty collection fetch leaves that collection stale
//!   rather than failing the whole refresh
//! - Lookups return `Option`, not empty sentinels

pub mod model;
pub mod poller;
pub mod snapshot;
#[allow(clippy::module_inception)]
pub mod store;

pub use model::{Location, Standard, Tag};
pub use poller::Poller;
pub use snapshot::Snapshot;
pub use store::{LocationStore, WebhookError};
