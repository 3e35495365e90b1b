use crate::domain::model::CacheStatus;
use std::collections::VecDeque;

pub const DEFAULT_CACHE_CAPACITY: usize = 6;

/// Bounded FIFO set of recently served character ids.
#[derive(Debug, Clone)]
pub struct RecentSelectionCache {
    entries: VecDeque<u64>,
    capacity: usize,
}

impl RecentSelectionCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn has(&self, character_id: u64) -> bool {
        self.entries.contains(&character_id)
    }

    /// Re-adding a present id keeps its original position.
    pub fn add(&mut self, character_id: u64) {
        if self.has(character_id) {
            return;
        }

        self.entries.push_back(character_id);

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            entries: self.entries.iter().copied().collect(),
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for RecentSelectionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}
