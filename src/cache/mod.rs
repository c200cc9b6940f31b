// Response cache module
// Author: kelexine (https://github.com/kelexine)

pub mod clock;
pub mod manager;
pub mod models;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::TtlCache;
pub use models::{CacheEntry, CacheStats};
