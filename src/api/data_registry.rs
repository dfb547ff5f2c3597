use indexmap::IndexMap;
use tracing::debug;

use crate::chart::PartNode;
use crate::core::{ArrayWriter, DataDeclarations, DataOwning, DataRef, DataValue, PartId};
use crate::error::ChartResult;

use super::graph_walk::{Emission, walk};

#[derive(Debug, Clone)]
pub struct DataEntry {
    provider: DataRef,
    values: Vec<DataValue>,
}

impl DataEntry {
    #[must_use]
    pub fn provider(&self) -> &DataRef {
        &self.provider
    }

    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }
}

/// De-duplicated data providers of one assembly, ordered by serial.
///
/// Values are materialized when the table is built, so re-encoding the same
/// assembly never reads a provider again.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    entries: IndexMap<PartId, DataEntry>,
}

impl DataTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serial of `provider` in this table.
    #[must_use]
    pub fn serial_of(&self, provider: &DataRef) -> Option<usize> {
        self.entries.get_index_of(&provider.key())
    }

    #[must_use]
    pub fn entry(&self, serial: usize) -> Option<&DataEntry> {
        self.entries.get_index(serial).map(|(_, entry)| entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = &DataEntry> {
        self.entries.values()
    }

    /// Writes one array of raw values per entry, in serial order.
    pub fn encode(&self, out: &mut ArrayWriter<'_>) -> ChartResult<()> {
        for entry in self.entries.values() {
            out.array(|values| {
                for value in &entry.values {
                    values.value(value.to_json());
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

/// Values read from one provider unless a different cap is configured.
pub const DEFAULT_MAX_DATA_POINTS: usize = 100_000;

/// Collects the providers declared by data-owning parts and turns them into
/// a [`DataTable`].
#[derive(Debug)]
pub struct DataRegistry {
    declarations: DataDeclarations,
    max_points: Option<usize>,
}

impl Default for DataRegistry {
    fn default() -> Self {
        Self {
            declarations: DataDeclarations::new(),
            max_points: Some(DEFAULT_MAX_DATA_POINTS),
        }
    }
}

impl DataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps how many values are read from each provider. `None` reads every
    /// provider to exhaustion and never returns for an unbounded one.
    #[must_use]
    pub fn with_max_points(mut self, max_points: Option<usize>) -> Self {
        self.max_points = max_points;
        self
    }

    /// Collects a fresh table for the graph reachable from `roots`.
    #[must_use]
    pub fn collect(roots: &[PartNode]) -> DataTable {
        let mut registry = Self::new();
        registry.declare_reachable(&walk(roots));
        registry.finish()
    }

    pub fn declare(&mut self, owner: &dyn DataOwning) {
        owner.declare_data(&mut self.declarations);
    }

    pub(crate) fn declare_reachable(&mut self, emissions: &[Emission]) {
        for emission in emissions {
            match emission {
                Emission::Part(node) => {
                    if let Some(owner) = node.as_data_owner() {
                        self.declare(owner);
                    }
                }
                Emission::Axis { axis, .. } => self.declare(&**axis),
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Reads every provider into a table whose serials follow first-declared
    /// order. Serials are only meaningful within the returned table.
    #[must_use]
    pub fn finish(self) -> DataTable {
        let limit = self.max_points.unwrap_or(usize::MAX);
        let mut entries = IndexMap::with_capacity(self.declarations.len());
        for provider in self.declarations.into_providers() {
            let values = provider.values().take(limit).collect();
            entries.insert(provider.key(), DataEntry { provider, values });
        }
        debug!(providers = entries.len(), "collected shared data table");
        DataTable { entries }
    }
}
