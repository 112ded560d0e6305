// ==========================================
// Nominal Compounds - Duplicate Sheet Importer
// ==========================================
// Each row lists a group of mutually-duplicate compound lemmas in
// consecutive columns, terminated by the first blank column. Every pair
// within the group yields one DUPLICATE_OF edge oriented from the
// higher-index lemma to the lower-index one.
// ==========================================

use calamine::{Data, Range};
use tracing::{info, warn};

use crate::domain::DuplicateSheetSummary;
use crate::graph::{GraphStore, NodeRef, PropertyValue};
use crate::importer::error::ImportResult;
use crate::importer::row_reader::{populated_prefix_len, string_cell};
use crate::importer::{COMPOUND_LABEL, DUPLICATE_OF};

pub struct DuplicateSheetImporter<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> DuplicateSheetImporter<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Imports the duplicate-groups sheet. The compounds referenced here
    /// must already have been imported from the master sheet; a pair
    /// naming an unknown lemma is skipped with a warning.
    pub async fn run(&self, sheet: &Range<Data>) -> ImportResult<DuplicateSheetSummary> {
        let mut summary = DuplicateSheetSummary::default();
        for (idx, row) in sheet.rows().enumerate() {
            // first row is the column header
            if idx == 0 {
                continue;
            }
            let row_num = idx + 1;
            summary.rows_processed += 1;

            let group_len = populated_prefix_len(row);
            if group_len < 2 {
                warn!(row = row_num, "malformed duplicate group: fewer than 2 lemmas");
                summary.malformed_rows += 1;
                continue;
            }
            let mut lemmas = Vec::with_capacity(group_len);
            for col in 0..group_len {
                match string_cell(row, col, row_num)? {
                    Some(lemma) => lemmas.push(lemma),
                    // populated_prefix_len only counts non-blank cells
                    None => break,
                }
            }
            self.import_group(&lemmas, &mut summary).await?;
        }
        info!(
            rows = summary.rows_processed,
            relationships = summary.relationships_created,
            malformed = summary.malformed_rows,
            missing = summary.missing_compounds,
            "duplicate sheet done"
        );
        Ok(summary)
    }

    /// Creates one DUPLICATE_OF edge per unordered pair, oriented toward
    /// the lower column index (the canonical entry of the pair). A pair
    /// with a lemma missing from the store is skipped, not fatal.
    async fn import_group(
        &self,
        lemmas: &[String],
        summary: &mut DuplicateSheetSummary,
    ) -> ImportResult<()> {
        for (i, canonical) in lemmas.iter().enumerate() {
            if !self.compound_exists(canonical).await? {
                warn!(lemma = canonical.as_str(), "compound not found in store");
                summary.missing_compounds += 1;
                continue;
            }
            for duplicate in &lemmas[i + 1..] {
                if !self.compound_exists(duplicate).await? {
                    warn!(lemma = duplicate.as_str(), "compound not found in store");
                    summary.missing_compounds += 1;
                    continue;
                }
                let canonical_props = vec![("lemma", PropertyValue::str(canonical.as_str()))];
                let duplicate_props = vec![("lemma", PropertyValue::str(duplicate.as_str()))];
                self.store
                    .upsert_relationship(
                        DUPLICATE_OF,
                        NodeRef::new(COMPOUND_LABEL, &duplicate_props),
                        NodeRef::new(COMPOUND_LABEL, &canonical_props),
                        &vec![],
                    )
                    .await?;
                summary.relationships_created += 1;
            }
        }
        Ok(())
    }

    async fn compound_exists(&self, lemma: &str) -> ImportResult<bool> {
        self.store
            .node_exists(
                COMPOUND_LABEL,
                &vec![("lemma", PropertyValue::str(lemma))],
            )
            .await
    }
}
