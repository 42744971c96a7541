//! Caching of upstream provider responses
//!
//! Responses are keyed by a fingerprint of everything that can change the
//! provider's output; correlation ids are excluded so an identical retry is
//! served from memory instead of costing another upstream call. Entries
//! live until their TTL passes or capacity pressure evicts the least
//! recently used one.
//!
//! Streaming requests and responses without usage metadata are never
//! cached; the same eligibility rules apply when reading and writing.

mod cache;
mod types;


pub use cache::ResponseCache;
pub use types::{CacheEntry, CacheKey, CacheStats};
