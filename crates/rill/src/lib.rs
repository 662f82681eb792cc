//! Rill - Streaming Measurement Aggregation Engine
//!
//! This crate aggregates a line-oriented stream of `<station>;<value>`
//! records into per-station running statistics, interning station names
//! through an arena-backed prefix trie instead of a hash map.
//!
//! # Components
//!
//! - [`KeyTrie`]: interns byte-string keys into dense integer ids via an
//!   index-linked node arena (no hashing, no per-insert allocation)
//! - [`StatsTable`]: per-id running count/min/max/sum in O(1) per record
//! - [`Engine`]: owns both arenas and drives parsing, interning, and
//!   aggregation over a buffered input stream
//!
//! # Example
//!
//! ```rust,ignore
//! use rill::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.ingest_reader(std::io::stdin().lock())?;
//!
//! // One row per station, lexicographic, min/mean/max at one decimal.
//! for summary in engine.summaries() {
//!     println!("{summary}");
//! }
//! ```

#![deny(missing_docs)]

pub mod clock;
pub mod error;
pub mod ingest;
pub mod table;
pub mod trie;

pub use error::{Result, RillError};
pub use ingest::{Engine, EngineConfig, Record};
pub use table::{KeyStats, KeySummary, StatsTable};
pub use trie::{KeyId, KeyTrie};
