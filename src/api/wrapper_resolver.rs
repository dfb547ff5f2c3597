use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chart::{Axis, CoordinateSystem};
use crate::core::{IdRegistry, Part, PartId};

/// Identity of a shared axis as placed in one coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WrapperHandle {
    id: PartId,
    axis: PartId,
    owner: PartId,
}

impl WrapperHandle {
    #[must_use]
    pub fn id(self) -> PartId {
        self.id
    }

    #[must_use]
    pub fn axis(self) -> PartId {
        self.axis
    }

    #[must_use]
    pub fn owner(self) -> PartId {
        self.owner
    }
}

/// Issues and caches one wrapper per (axis, owner) pair.
#[derive(Debug, Clone)]
pub struct WrapperResolver {
    registry: IdRegistry,
    wrappers: IndexMap<(PartId, PartId), WrapperHandle>,
}

impl Default for WrapperResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl WrapperResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(IdRegistry::global())
    }

    #[must_use]
    pub fn with_registry(registry: IdRegistry) -> Self {
        Self {
            registry,
            wrappers: IndexMap::new(),
        }
    }

    /// Returns the wrapper for `axis` inside `owner`, creating it on first use.
    pub fn wrap(&mut self, axis: &Axis, owner: &CoordinateSystem) -> WrapperHandle {
        let key = (axis.id(), owner.id());
        let registry = &self.registry;
        *self.wrappers.entry(key).or_insert_with(|| WrapperHandle {
            id: registry.next_id(),
            axis: key.0,
            owner: key.1,
        })
    }

    #[must_use]
    pub fn get(&self, axis: PartId, owner: PartId) -> Option<WrapperHandle> {
        self.wrappers.get(&(axis, owner)).copied()
    }

    #[must_use]
    pub fn wraps(&self, axis: PartId) -> bool {
        self.wrappers.keys().any(|(wrapped, _)| *wrapped == axis)
    }

    pub fn handles(&self) -> impl Iterator<Item = WrapperHandle> + '_ {
        self.wrappers.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}
