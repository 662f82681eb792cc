//! Streaming ingestion engine.
//!
//! This module owns the two core arenas — the key-interning trie and the
//! per-key statistics table — and drives records through them:
//!
//! ```text
//! line -> parse (key, tenths) -> intern key -> record stats
//! ```
//!
//! Ingestion is single-threaded and synchronous: one record at a time from a
//! blocking reader, no state across records beyond the two arenas. The
//! original kept those arenas as process-wide globals; here they live in an
//! explicit [`Engine`] constructed once and held by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use rill::ingest::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.ingest_reader(std::io::Cursor::new("Foo;12.3\nBar;-5.0\n"))?;
//! for summary in engine.summaries() {
//!     println!("{summary}");
//! }
//! ```

pub mod record;

use crate::error::{Result, RillError};
use crate::table::{KeyStats, KeySummary, StatsTable};
use crate::trie::{KeyId, KeyTrie};
use std::io::BufRead;
use tracing::debug;

pub use record::{parse_fixed, parse_record, Record};

/// Default maximum number of distinct keys.
pub const DEFAULT_MAX_KEYS: usize = 16_384;

/// Default trie node arena capacity.
pub const DEFAULT_MAX_NODES: usize = 1 << 20;

/// Default maximum input line length in bytes, excluding the terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Configuration for the ingestion engine.
///
/// The capacities are sized generously above the expected distinct-key
/// cardinality: the workload is a small, bounded set of keys against a huge
/// record count, so exhausting an arena is a sizing bug, not an expected
/// runtime condition.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of distinct keys. Default: 16 384.
    pub max_keys: usize,
    /// Trie node arena capacity, including the root sentinel.
    /// Default: 1 048 576.
    pub max_nodes: usize,
    /// Maximum line length in bytes, excluding the terminator. A longer
    /// line is a fatal error: streaming reads records whole. Default: 512.
    pub max_line_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_keys: DEFAULT_MAX_KEYS,
            max_nodes: DEFAULT_MAX_NODES,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with a custom distinct-key capacity.
    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Creates a configuration with a custom trie node arena capacity.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Creates a configuration with a custom line length bound.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }
}

/// Streaming aggregation engine owning the trie and statistics arenas.
pub struct Engine {
    trie: KeyTrie,
    table: StatsTable,
    config: EngineConfig,
    record_count: u64,
}

impl Engine {
    /// Creates an empty engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            trie: KeyTrie::new(config.max_nodes, config.max_keys),
            table: StatsTable::new(config.max_keys),
            config,
            record_count: 0,
        }
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processes one record line (terminator already stripped).
    ///
    /// Returns the key id the record was aggregated under.
    ///
    /// # Errors
    ///
    /// Propagates parse errors ([`RillError::MissingSeparator`],
    /// [`RillError::EmptyKey`], [`RillError::InvalidValue`]) and arena
    /// capacity errors ([`RillError::TrieNodesFull`],
    /// [`RillError::StationTableFull`]).
    pub fn ingest_record(&mut self, line: &[u8]) -> Result<KeyId> {
        let record = record::parse_record(line)?;
        let (id, _is_new) = self.trie.intern(record.key)?;
        self.table.record(id, record.value)?;
        self.record_count += 1;
        Ok(id)
    }

    /// Ingests every line from a reader until end of stream.
    ///
    /// Lines are framed by `\n`; the final line may omit its terminator.
    /// Returns the number of records ingested.
    ///
    /// # Errors
    ///
    /// Returns [`RillError::LineTooLong`] for a line exceeding the
    /// configured bound, [`RillError::Io`] for stream failures, and any
    /// per-record error from [`Engine::ingest_record`]. Ingestion stops at
    /// the first error; no partial-result recovery is attempted.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> Result<u64> {
        let ingested_before = self.record_count;
        let mut line = Vec::with_capacity(self.config.max_line_len);
        loop {
            line.clear();
            let read = reader.read_until(b'\n', &mut line)?;
            if read == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.len() > self.config.max_line_len {
                return Err(RillError::LineTooLong {
                    limit: self.config.max_line_len,
                });
            }
            self.ingest_record(&line)?;
        }
        let ingested = self.record_count - ingested_before;
        debug!(
            records = ingested,
            keys = self.trie.key_count(),
            nodes = self.trie.node_count(),
            "ingestion pass complete"
        );
        Ok(ingested)
    }

    /// Returns the statistics for a key by its raw bytes, if seen.
    pub fn stats(&self, key: &[u8]) -> Option<&KeyStats> {
        self.trie.lookup(key).and_then(|id| self.table.get(id))
    }

    /// Returns one summary row per key, in lexicographic byte order.
    pub fn summaries(&self) -> Vec<KeySummary> {
        self.trie
            .keys()
            .into_iter()
            .filter_map(|(key, id)| {
                self.table
                    .get(id)
                    .map(|stats| KeySummary::new(&key, stats))
            })
            .collect()
    }

    /// Folds another engine's aggregates into this one.
    ///
    /// Merging matches keys by their raw bytes, not by id: per-shard ids are
    /// only locally stable, so each of `other`'s keys is re-interned here
    /// before its statistics are combined (`count +=`, `sum +=`,
    /// `min = min(mins)`, `max = max(maxes)`). This is the fold step a
    /// sharded driver needs after running one engine per input shard.
    ///
    /// # Errors
    ///
    /// Returns an arena capacity error if the union of keys does not fit
    /// this engine's configuration.
    pub fn absorb(&mut self, other: &Engine) -> Result<()> {
        for (key, other_id) in other.trie.keys() {
            if let Some(stats) = other.table.get(other_id) {
                let (id, _is_new) = self.trie.intern(&key)?;
                self.table.merge(id, stats)?;
            }
        }
        self.record_count += other.record_count;
        debug!(
            keys = self.trie.key_count(),
            records = self.record_count,
            "absorbed shard"
        );
        Ok(())
    }

    /// Returns the number of records ingested so far.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Returns the number of distinct keys interned so far.
    pub fn key_count(&self) -> usize {
        self.trie.key_count()
    }
}
