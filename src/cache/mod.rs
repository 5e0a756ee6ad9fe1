//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! (method, target)
//!     → key.rs (CacheKey "<METHOD> <TARGET>")
//!     → store.rs (sharded map lookup, lazy expiry)
//!     → Hit: entry.rs snapshot served as-is
//!     → Miss/Expired: origin response
//!         → policy.rs (GET + 2xx/3xx?)
//!         → store.rs put (new entry, new timestamp)
//! ```
//!
//! # Design Decisions
//! - Entries are immutable and shared via Arc; readers never see a partial entry
//! - No background sweeper; expired entries are evicted by the lookup that finds them
//! - No size bound and no coalescing of concurrent misses on the same key

pub mod entry;
pub mod key;
pub mod policy;
pub mod store;

pub use entry::{CacheEntry, ResponseSnapshot};
pub use key::CacheKey;
pub use policy::CachePolicy;
pub use store::{CacheLookup, CacheStore, DEFAULT_TTL};
