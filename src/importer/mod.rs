// ==========================================
// Nominal Compounds - Importer Layer
// ==========================================
// Sheet importers plus the shared cell-reading and error plumbing. Each
// importer consumes one calamine sheet and writes through a GraphStore.
// ==========================================

pub mod compound_importer;
pub mod duplicate_importer;
pub mod error;
pub mod row_reader;
pub mod work_importer;

pub use compound_importer::CompoundSheetImporter;
pub use duplicate_importer::DuplicateSheetImporter;
pub use error::{ImportError, ImportResult};
pub use work_importer::{SheetLayout, WorkSheetImporter};

// ===== node labels =====
pub const COMPOUND_LABEL: &str = "NominalCompound";
pub const MEMBER_LABEL: &str = "Member";
pub const AUTHOR_LABEL: &str = "Author";
pub const WORK_LABEL: &str = "Work";

// ===== relationship types =====
pub const FORMED_BY: &str = "FORMED_BY";
pub const DUPLICATE_OF: &str = "DUPLICATE_OF";
pub const WRITTEN_BY: &str = "WRITTEN_BY";
pub const CONTAINS: &str = "CONTAINS";
