//! Configuration for the storage layer.

/// How the presence mask reacts to a component type registered after
/// entity data has been written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LayoutPolicy {
    /// Re-lay out the bit matrix whenever the row stride grows.
    #[default]
    Migrate,
    /// Reject new component types once any presence bit has been written.
    Frozen,
}

/// Configuration for a [`World`](crate::World).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Policy for component types registered after data exists.
    pub layout: LayoutPolicy,

    /// Whether destroyed ids go back into the FIFO reuse queue.
    pub recycle_destroyed_ids: bool,

    /// Number of entity ids the allocator is pre-sized for.
    pub initial_entity_capacity: usize,
}

impl StorageConfig {
    /// Creates the default configuration: migrating layout, no id reuse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that requires every component type to be
    /// registered before entity data is written.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            layout: LayoutPolicy::Frozen,
            ..Self::default()
        }
    }

    /// Creates a configuration that reuses destroyed ids.
    #[must_use]
    pub fn recycling() -> Self {
        Self {
            recycle_destroyed_ids: true,
            ..Self::default()
        }
    }

    /// Builder method to set the layout policy.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    /// Builder method to enable or disable id reuse.
    #[must_use]
    pub fn with_recycling(mut self, recycle: bool) -> Self {
        self.recycle_destroyed_ids = recycle;
        self
    }

    /// Builder method to pre-size the entity allocator.
    #[must_use]
    pub fn with_initial_entity_capacity(mut self, capacity: usize) -> Self {
        self.initial_entity_capacity = capacity;
        self
    }
}
