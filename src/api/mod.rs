//! Document assembly pipeline.
//!
//! `ChartDocument::build` runs validation, shared-data collection, wrapper
//! resolution and encoding in that fixed order. Each stage depends on state
//! written by the one before it.

mod assembler;
mod config;
mod data_registry;
mod document;
mod encoder;
mod graph_walk;
mod validation;
mod wrapper_resolver;

pub use assembler::{Assembly, ChartDocument};
pub use config::AssemblyConfig;
pub use data_registry::{DEFAULT_MAX_DATA_POINTS, DataEntry, DataRegistry, DataTable};
pub use document::{DOCUMENT_JSON_SCHEMA_V1, Document, DocumentJsonContractV1};
pub use encoder::EncodeContext;
pub use wrapper_resolver::{WrapperHandle, WrapperResolver};
