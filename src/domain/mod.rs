// ==========================================
// Nominal Compounds - Domain Layer
// ==========================================
// Entity records and import summary records.
// ==========================================

pub mod entities;
pub mod summary;

pub use entities::{Author, Compound, Member, Work, GRECISM_SUBTYPE, GRECISM_TYPE};
pub use summary::{
    CompoundSheetSummary, DuplicateSheetSummary, RunSummary, WorkFileSummary, WorkSheetSummary,
};
