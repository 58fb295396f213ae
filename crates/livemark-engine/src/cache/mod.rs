//! # Line Cache
//!
//! Bounded least-recently-used memo of resolved element lists, keyed by
//! line number and exact line text. Values are stored with line-relative
//! offsets so a hit stays valid when earlier lines change length.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::Serialize;
use thiserror::Error;

use crate::parsing::element::ParsedElement;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Cache key: a line is reused only if both its number and its text match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub line_number: usize,
    pub text: String,
}

impl LineKey {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
pub struct LineCache {
    entries: LruCache<LineKey, Vec<ParsedElement>>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl LineCache {
    pub const DEFAULT_CAPACITY: usize = 2000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A zero capacity is raised to one; use [`LineCache::try_with_capacity`]
    /// to reject it instead.
    pub fn with_capacity(max_size: usize) -> Self {
        let cap = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn try_with_capacity(max_size: usize) -> Result<Self, CacheError> {
        let cap = NonZeroUsize::new(max_size).ok_or(CacheError::ZeroCapacity)?;
        Ok(Self::with_capacity(cap.get()))
    }

    /// Looks up `key` and marks it most recently used.
    pub fn get(&mut self, key: &LineKey) -> Option<&[ParsedElement]> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                log::trace!("cache hit for line {}", key.line_number);
                Some(value.as_slice())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores `value` under `key`. Inserting a new key into a full cache
    /// evicts exactly the least recently used entry; replacing an existing
    /// key never evicts.
    pub fn set(&mut self, key: LineKey, value: Vec<ParsedElement>) {
        let replacing = self.entries.contains(&key);
        if let Some((evicted, _)) = self.entries.push(key, value) {
            if !replacing {
                self.evictions += 1;
                log::trace!("cache evicted line {}", evicted.line_number);
            }
        }
    }

    /// Membership test that leaves recency untouched.
    pub fn contains(&self, key: &LineKey) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        log::debug!("clearing line cache ({} entries)", self.entries.len());
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_size: self.entries.cap().get(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

impl Default for LineCache {
    fn default() -> Self {
        Self::new()
    }
}
