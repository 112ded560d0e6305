// ==========================================
// Nominal Compounds - Core Library
// ==========================================
// Imports spreadsheet-encoded Latin nominal-compound annotations into a
// labeled property graph: compounds and their members from the master
// workbook, duplicate groups, and per-work occurrence sheets.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and run summaries
pub mod domain;

// Graph layer - store contract, neo4rs backend, in-memory test store
pub mod graph;

// Importer layer - per-sheet importers and cell reading
pub mod importer;

// Configuration layer - properties file / positional arguments
pub mod config;

// Logging
pub mod logging;

// Pipeline - one full run over master and work workbooks
pub mod pipeline;

// ==========================================
// Re-exports
// ==========================================

pub use config::{ConfigError, RunConfig};
pub use domain::{
    Author, Compound, CompoundSheetSummary, DuplicateSheetSummary, Member, RunSummary, Work,
    WorkFileSummary, WorkSheetSummary,
};
pub use graph::{GraphStore, MemoryStore, Neo4jStore, NodeRef, Properties, PropertyValue};
pub use importer::{
    CompoundSheetImporter, DuplicateSheetImporter, ImportError, ImportResult, SheetLayout,
    WorkSheetImporter,
};
pub use pipeline::Pipeline;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
