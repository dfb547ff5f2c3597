use tracing::{debug, trace};

use crate::chart::PartNode;
use crate::core::{IdRegistry, JsonBuffer};
use crate::error::ChartResult;

use super::config::AssemblyConfig;
use super::data_registry::{DataRegistry, DataTable};
use super::document::Document;
use super::encoder::{EncodeContext, encode_emission};
use super::graph_walk::{Emission, walk};
use super::validation::{reset_graph, validate_graph};
use super::wrapper_resolver::WrapperResolver;

/// Top-level parts of one chart, in declaration order.
///
/// Parts nested under a root (a series' coordinate system, a coordinate
/// system's axes) are reached automatically and need not be added.
#[derive(Debug, Clone)]
pub struct ChartDocument {
    roots: Vec<PartNode>,
    config: AssemblyConfig,
    registry: IdRegistry,
}

impl Default for ChartDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            config: AssemblyConfig::default(),
            registry: IdRegistry::global(),
        }
    }

    pub fn with_config(config: AssemblyConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Uses `registry` for wrapper identities issued by this document.
    #[must_use]
    pub fn with_id_registry(mut self, registry: IdRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_part(mut self, part: impl Into<PartNode>) -> Self {
        self.roots.push(part.into());
        self
    }

    pub fn add(&mut self, part: impl Into<PartNode>) -> &mut Self {
        self.roots.push(part.into());
        self
    }

    #[must_use]
    pub fn roots(&self) -> &[PartNode] {
        &self.roots
    }

    #[must_use]
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Validates the graph, collects the shared data table and resolves
    /// wrappers for shared axes.
    ///
    /// Each call starts from scratch: validation state, axis claims, serials
    /// and wrappers from earlier calls are discarded.
    pub fn assemble(&self) -> ChartResult<Assembly> {
        let emissions = walk(&self.roots);
        reset_graph(&emissions);
        validate_graph(&emissions)?;

        let mut registry = DataRegistry::new().with_max_points(self.config.max_data_points);
        registry.declare_reachable(&emissions);
        let data = registry.finish();

        let mut wrappers = WrapperResolver::with_registry(self.registry.clone());
        for emission in &emissions {
            if let Emission::Axis {
                axis,
                owner,
                shared: true,
                ..
            } = emission
            {
                wrappers.wrap(axis, owner);
            }
        }
        debug!(
            parts = emissions.len(),
            data = data.len(),
            wrappers = wrappers.len(),
            "assembled chart graph"
        );

        Ok(Assembly {
            emissions,
            data,
            wrappers,
            config: self.config.clone(),
        })
    }

    /// Assembles and encodes the document in one step.
    pub fn build(&self) -> ChartResult<Document> {
        self.assemble()?.encode()
    }
}

/// A validated graph with its data table and wrappers, ready to encode.
#[derive(Debug, Clone)]
pub struct Assembly {
    emissions: Vec<Emission>,
    data: DataTable,
    wrappers: WrapperResolver,
    config: AssemblyConfig,
}

impl Assembly {
    #[must_use]
    pub fn data_table(&self) -> &DataTable {
        &self.data
    }

    #[must_use]
    pub fn wrappers(&self) -> &WrapperResolver {
        &self.wrappers
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.emissions.len()
    }

    /// Encodes the document. Repeated calls yield identical text as long as
    /// the graph is not changed in between.
    ///
    /// Nothing is returned unless every part encodes: a coordinate system
    /// whose slots changed after assembly aborts the whole document.
    pub fn encode(&self) -> ChartResult<Document> {
        let context = EncodeContext::new(&self.data, &self.wrappers);
        let mut emitted = 0;
        let mut buffer = JsonBuffer::with_capacity(256 * (self.emissions.len() + 1));
        buffer.object(|document| {
            document.array(&self.config.parts_key, |parts| {
                for emission in &self.emissions {
                    // Coordinate systems and axes stay in the document because
                    // series and coordinate systems name them by id.
                    if !self.config.emit_hidden_parts
                        && !emission.visible()
                        && !emission.is_referenced()
                    {
                        trace!(kind = emission.kind(), "skip hidden part");
                        continue;
                    }
                    parts.object(|part| encode_emission(part, emission, &context))?;
                }
                emitted = parts.items();
                Ok(())
            })?;
            document.array(&self.config.shared_data_key, |table| self.data.encode(table))?;
            Ok(())
        })?;

        debug!(
            parts = emitted,
            data = self.data.len(),
            bytes = buffer.len(),
            "encoded chart document"
        );
        Ok(Document::new(buffer.into_string(), emitted, self.data.len()))
    }
}
