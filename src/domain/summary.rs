// ==========================================
// Nominal Compounds - Import Summaries
// ==========================================
// Explicit per-sheet counter records returned by each importer run,
// aggregated into a RunSummary by the pipeline.
// ==========================================

use serde::Serialize;

/// Counters for one run over the master compound sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundSheetSummary {
    pub compounds_created: usize,
    pub members_processed: usize,
    pub relationships_created: usize,
    pub grecisms_found: usize,
    pub empty_rows: usize,
    pub errors: usize,
}

/// Counters for one run over the duplicate-groups sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSheetSummary {
    pub rows_processed: usize,
    pub relationships_created: usize,
    pub malformed_rows: usize,
    pub missing_compounds: usize,
}

/// Counters for one run over a per-work sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct WorkSheetSummary {
    pub compounds_found: usize,
    pub grecisms_found: usize,
    pub empty_rows: usize,
    pub not_found: usize,
    pub conflicts: usize,
    pub errors: usize,
}

/// The summary of one work file, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkFileSummary {
    pub file: String,
    #[serde(flatten)]
    pub summary: WorkSheetSummary,
}

/// End-of-run tallies across the whole pipeline.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub compounds: Option<CompoundSheetSummary>,
    pub duplicates: Option<DuplicateSheetSummary>,
    pub works: Vec<WorkFileSummary>,
    pub work_files_processed: usize,
    pub work_files_failed: usize,
}
