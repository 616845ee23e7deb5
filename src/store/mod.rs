//! Persistence seams for per-user collection and wishlist maps.
//!
//! The trackers only talk to [`KeyValueStore`]; which backend sits behind it
//! (an on-device file, a remote account service, an in-memory map) is decided
//! by whoever builds the tracker.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, TrackedValue};
