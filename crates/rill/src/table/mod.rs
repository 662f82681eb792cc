//! Per-key running statistics, indexed by interned key id.
//!
//! Measurements are fixed-point integers (value × 10), so aggregation is
//! exact integer arithmetic; the mean is derived on demand and never stored.
//! `i64` accumulators accommodate ~10⁹ records of values in [-1000, 1000]
//! tenths without overflow.

use crate::error::{Result, RillError};
use crate::trie::KeyId;

/// Running statistics for a single interned key.
///
/// A fresh slot is zero-initialized; the first recorded value seeds `min`
/// and `max` rather than comparing against the zeroed bounds, so keys whose
/// values are all positive (or all negative) report true extremes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStats {
    /// Number of records seen for this key.
    pub count: u64,
    /// Smallest value seen, in tenths.
    pub min: i64,
    /// Largest value seen, in tenths.
    pub max: i64,
    /// Sum of all values seen, in tenths.
    pub sum: i64,
}

impl KeyStats {
    /// Records one measurement.
    pub fn record(&mut self, value: i64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
        }
        self.count += 1;
        self.sum += value;
    }

    /// Folds another key's statistics into this one.
    ///
    /// Combines by `count +=`, `sum +=`, `min = min(mins)`, `max = max(maxes)`.
    /// An empty side contributes nothing and must not bias the extremes.
    pub fn merge(&mut self, other: &KeyStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.count += other.count;
        self.sum += other.sum;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    /// Returns the mean measurement, rounded to one decimal place.
    ///
    /// Returns 0.0 for a slot with no records.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        // Round in tenths space: the sum is exact there, so the only
        // floating-point rounding happens in a single division.
        let mean_tenths = self.sum as f64 / self.count as f64;
        mean_tenths.round() / 10.0
    }
}

/// Table of per-key statistics, indexed densely by [`KeyId`].
///
/// Slot 0 is reserved to mirror the trie's id space (id 0 is never issued).
/// Slots are created zero-initialized the moment an id is first recorded and
/// are never destroyed during a run.
pub struct StatsTable {
    slots: Vec<KeyStats>,
    max_keys: usize,
}

impl StatsTable {
    /// Creates a table bounded to `max_keys` distinct keys.
    pub fn new(max_keys: usize) -> Self {
        Self {
            // +1 for the reserved slot 0.
            slots: Vec::with_capacity(max_keys + 1),
            max_keys,
        }
    }

    /// Records one measurement for `id`.
    ///
    /// Ids are issued densely by the trie, so at most one fresh slot is
    /// created per call.
    ///
    /// # Errors
    ///
    /// Returns [`RillError::StationTableFull`] if `id` lies beyond the
    /// configured capacity.
    pub fn record(&mut self, id: KeyId, value: i64) -> Result<()> {
        let index = id as usize;
        if index >= self.slots.len() {
            if index > self.max_keys {
                return Err(RillError::StationTableFull {
                    capacity: self.max_keys,
                });
            }
            self.slots.resize(index + 1, KeyStats::default());
        }
        self.slots[index].record(value);
        Ok(())
    }

    /// Folds `other` into the slot for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RillError::StationTableFull`] if `id` lies beyond the
    /// configured capacity.
    pub fn merge(&mut self, id: KeyId, other: &KeyStats) -> Result<()> {
        let index = id as usize;
        if index >= self.slots.len() {
            if index > self.max_keys {
                return Err(RillError::StationTableFull {
                    capacity: self.max_keys,
                });
            }
            self.slots.resize(index + 1, KeyStats::default());
        }
        self.slots[index].merge(other);
        Ok(())
    }

    /// Returns the statistics for `id`, if any record has referenced it.
    pub fn get(&self, id: KeyId) -> Option<&KeyStats> {
        self.slots.get(id as usize).filter(|stats| stats.count > 0)
    }

    /// Returns the number of keys with at least one record.
    pub fn key_count(&self) -> usize {
        self.slots.iter().filter(|stats| stats.count > 0).count()
    }
}

/// Aggregated report row for one key.
///
/// Values are decoded from fixed-point tenths to decimal; the station name
/// is decoded lossily as UTF-8 for display while aggregation itself stays
/// byte-exact.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySummary {
    /// Station name.
    pub name: String,
    /// Smallest measurement.
    pub min: f64,
    /// Mean measurement, rounded to one decimal place.
    pub mean: f64,
    /// Largest measurement.
    pub max: f64,
}

impl KeySummary {
    /// Builds a summary row from a key's bytes and statistics.
    pub fn new(key: &[u8], stats: &KeyStats) -> Self {
        Self {
            name: String::from_utf8_lossy(key).into_owned(),
            min: stats.min as f64 / 10.0,
            mean: stats.mean(),
            max: stats.max as f64 / 10.0,
        }
    }
}

impl std::fmt::Display for KeySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={:.1}/{:.1}/{:.1}",
            self.name, self.min, self.mean, self.max
        )
    }
}
