//! Game results and their persistence.
//!
//! ## Key Types
//!
//! - `GameResult` / `Winner`: the immutable outcome of one game
//! - `KeyValueStore`: the persistence seam (`InMemoryStore`,
//!   `FileStore` provided)
//! - `HistoryLog`: the newest-first log mirrored to a store key

pub mod log;
pub mod result;
pub mod store;

pub use log::{HistoryLog, HISTORY_KEY};
pub use result::{GameResult, Winner};
pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError};
