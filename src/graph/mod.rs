// ==========================================
// Nominal Compounds - Graph Layer
// ==========================================
// The store contract plus its two implementations: neo4rs-backed for
// real runs, in-memory for tests.
// ==========================================

pub mod memory;
pub mod neo4j;
pub mod store;

pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;
pub use store::{GraphStore, NodeRef, Properties, PropertyValue};
