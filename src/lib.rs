//! chart-doc: chart configuration graphs encoded as one JSON document.
//!
//! Client code assembles parts (coordinate systems, axes, series, components)
//! and data providers into a graph. [`ChartDocument::build`] validates that
//! graph, stores every distinct data provider once in a shared table, gives
//! shared axes a separate identity per coordinate system, and encodes the
//! result for a browser-side charting runtime.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AssemblyConfig, ChartDocument, Document};
pub use error::{ChartError, ChartResult};
