//! Entity id lifecycle.
//!
//! The `EntityAllocator` hands out ids from a FIFO queue of released ids when
//! one is available, otherwise from a monotonic counter. Whether destroyed ids
//! are ever queued is up to the configuration; by default they are not, so ids
//! are never reused.

// Backing indices are derived from u32 entity ids
#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;

use deluge_foundation::EntityId;

use crate::growth::ensure_capacity;

/// Issues and retires entity ids.
#[derive(Debug, Clone, Default)]
pub struct EntityAllocator {
    /// Liveness per id. Grows by doubling, so its length is the
    /// addressable bound rather than the number of ids issued.
    alive: Vec<bool>,
    /// Released ids waiting for reuse, oldest first.
    free: VecDeque<EntityId>,
    /// Next never-issued id.
    next: u32,
    /// Count of live entities.
    live_count: usize,
    /// Whether `release` queues ids for reuse.
    recycle: bool,
}

impl EntityAllocator {
    /// Creates an allocator that never reuses ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that queues released ids for reuse.
    #[must_use]
    pub fn recycling() -> Self {
        Self {
            recycle: true,
            ..Self::default()
        }
    }

    /// Pre-sizes the backing array so the first `capacity` ids need no growth.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > 0 {
            ensure_capacity(&mut self.alive, capacity - 1);
        }
    }

    /// Issues a fresh id.
    ///
    /// Reuses the oldest released id when one is queued, otherwise mints the
    /// next value of the counter.
    pub fn create(&mut self) -> EntityId {
        let id = self.free.pop_front().unwrap_or_else(|| {
            let id = EntityId::new(self.next);
            self.next += 1;
            id
        });

        ensure_capacity(&mut self.alive, id.index());
        self.alive[id.index()] = true;
        self.live_count += 1;
        id
    }

    /// Retires an id.
    ///
    /// Returns `false` if `id` lies outside the backing array, `true`
    /// otherwise. An id in bounds that was never issued or already released
    /// still reports `true`; it is only queued for reuse on its live-to-dead
    /// transition.
    pub fn release(&mut self, id: EntityId) -> bool {
        let Some(alive) = self.alive.get_mut(id.index()) else {
            return false;
        };

        if *alive {
            *alive = false;
            self.live_count -= 1;
            if self.recycle {
                self.free.push_back(id);
            }
        }
        true
    }

    /// Returns true if `id` lies within the backing array.
    #[must_use]
    pub fn is_addressable(&self, id: EntityId) -> bool {
        id.index() < self.alive.len()
    }

    /// Returns true if `id` was issued and not released since.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.get(id.index()).copied().unwrap_or(false)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the length of the backing array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    /// Returns the number of released ids waiting for reuse.
    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Returns whether released ids are queued for reuse.
    #[must_use]
    pub fn recycles(&self) -> bool {
        self.recycle
    }

    /// Iterates over live ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| EntityId::new(index as u32))
    }
}
