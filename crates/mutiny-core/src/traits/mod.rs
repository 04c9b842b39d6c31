//! Core traits defined in `mutiny-core` and implemented by other crates.

pub mod clock;
pub mod collection;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::{Collection, Document};
