// ==========================================
// Nominal Compounds - Work Sheet Importer
// ==========================================
// One sheet per literary work. Header block (rows 1-3): author, then
// title/acronym, then genre/subgenre. Typed layout adds a sparse type
// header (row 4) and a subtype header (row 5); the flat layout leaves
// rows 4-5 blank. Rows 6+ hold one compound occurrence each.
// ==========================================

use calamine::{Data, Range};
use tracing::{info, warn};

use crate::domain::{Author, Compound, Work, WorkSheetSummary};
use crate::graph::{GraphStore, NodeRef, Properties, PropertyValue};
use crate::importer::compound_importer::compound_match_props;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_reader::{first_numeric_col, first_populated_col, int_cell, string_cell};
use crate::importer::{AUTHOR_LABEL, COMPOUND_LABEL, CONTAINS, WORK_LABEL, WRITTEN_BY};

/// Index of the first compound row (0-based); rows 4-5 hold the type and
/// subtype headers in the typed layout and are reserved in the flat one.
const FIRST_COMPOUND_ROW: usize = 5;

/// The two supported work-sheet layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// Type/subtype header rows annotate every occurrence column.
    Typed,
    /// Plain (lemma, occurrence count) rows, no classification.
    Flat,
}

impl SheetLayout {
    /// A sheet with anything in the header rows 4-5 is typed; a flat
    /// sheet leaves them blank.
    pub fn detect(sheet: &Range<Data>) -> Self {
        let populated = sheet
            .rows()
            .skip(3)
            .take(2)
            .any(|row| first_populated_col(row).is_some());
        if populated {
            SheetLayout::Typed
        } else {
            SheetLayout::Flat
        }
    }
}

pub struct WorkSheetImporter<'a> {
    store: &'a dyn GraphStore,
    layout: SheetLayout,
}

impl<'a> WorkSheetImporter<'a> {
    pub fn new(store: &'a dyn GraphStore, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    /// Imports one work sheet: author/work/WRITTEN_BY first, then one
    /// CONTAINS edge per valid compound row. An invalid header block is
    /// fatal for the sheet; row problems are counted and skipped.
    pub async fn run(&self, sheet: &Range<Data>) -> ImportResult<WorkSheetSummary> {
        let rows: Vec<&[Data]> = sheet.rows().collect();
        if rows.len() < 3 {
            return Err(ImportError::InvalidHeader(
                "sheet is missing the author/work header block".to_string(),
            ));
        }

        let author = parse_author(rows[0])?;
        let work = parse_work(rows[1], rows[2])?;
        let author_props = author_props(&author);
        let work_props = work_props(&work);

        self.store.upsert_node(AUTHOR_LABEL, &author_props).await?;
        self.store.upsert_node(WORK_LABEL, &work_props).await?;
        self.store
            .upsert_relationship(
                WRITTEN_BY,
                NodeRef::new(WORK_LABEL, &work_props),
                NodeRef::new(AUTHOR_LABEL, &author_props),
                &vec![],
            )
            .await?;

        let headers = match self.layout {
            SheetLayout::Typed => {
                if rows.len() < FIRST_COMPOUND_ROW {
                    return Err(ImportError::InvalidHeader(
                        "typed sheet is missing the type/subtype header rows".to_string(),
                    ));
                }
                Some((rows[3], rows[4]))
            }
            SheetLayout::Flat => None,
        };

        let mut summary = WorkSheetSummary::default();
        for (idx, row) in rows.iter().enumerate().skip(FIRST_COMPOUND_ROW) {
            let row_num = idx + 1;
            match self
                .import_row(row, row_num, headers, &work_props, &mut summary)
                .await
            {
                Ok(()) => {}
                Err(err) if err.is_sheet_fatal() => return Err(err),
                Err(err) => {
                    warn!(row = row_num, error = %err, "work sheet row skipped");
                    summary.errors += 1;
                }
            }
        }

        info!(
            work = work.title.as_str(),
            compounds = summary.compounds_found,
            grecisms = summary.grecisms_found,
            empty = summary.empty_rows,
            not_found = summary.not_found,
            conflicts = summary.conflicts,
            errors = summary.errors,
            "work sheet done"
        );
        Ok(summary)
    }

    async fn import_row(
        &self,
        row: &[Data],
        row_num: usize,
        headers: Option<(&[Data], &[Data])>,
        work_props: &Properties,
        summary: &mut WorkSheetSummary,
    ) -> ImportResult<()> {
        let Some(compound) = self.parse_row(row, row_num, headers)? else {
            summary.empty_rows += 1;
            return Ok(());
        };
        summary.compounds_found += 1;
        if compound.is_grecism() {
            summary.grecisms_found += 1;
        }

        let lemma_props = vec![("lemma", PropertyValue::str(compound.lemma.as_str()))];
        if !self.store.node_exists(COMPOUND_LABEL, &lemma_props).await? {
            warn!(
                lemma = compound.lemma.as_str(),
                "COMPOUND NOT FOUND IN THE MASTER COMPOUND LIST"
            );
            summary.not_found += 1;
            return Ok(());
        }

        if self.layout == SheetLayout::Typed && !self.reconcile(&compound, summary).await? {
            return Ok(());
        }

        self.store
            .upsert_relationship(
                CONTAINS,
                NodeRef::new(WORK_LABEL, work_props),
                NodeRef::new(COMPOUND_LABEL, &compound_match_props(&compound)),
                &vec![("occurrences", PropertyValue::Int(compound.occurrences))],
            )
            .await?;
        Ok(())
    }

    /// Applies the type/subtype reconciliation rule against the stored
    /// node. Returns false when the row must be skipped (conflict).
    ///
    /// A node created from a flat work sheet or an older master list may
    /// still lack type/subtype; the first typed occurrence backfills
    /// them. After that the stored pair is authoritative: a disagreeing
    /// row is logged and dropped without touching the node.
    async fn reconcile(
        &self,
        compound: &Compound,
        summary: &mut WorkSheetSummary,
    ) -> ImportResult<bool> {
        let (Some(row_type), Some(row_subtype)) =
            (compound.compound_type.as_deref(), compound.subtype.as_deref())
        else {
            // typed layout always fills both; nothing to reconcile otherwise
            return Ok(true);
        };
        let lemma_props = vec![("lemma", PropertyValue::str(compound.lemma.as_str()))];
        let stored = self
            .store
            .fetch_properties(COMPOUND_LABEL, &lemma_props, &["type", "subtype"])
            .await?;
        let Some(stored) = stored else {
            // existence was checked just before; treat a vanished node as skippable
            summary.not_found += 1;
            return Ok(false);
        };
        let stored_type = stored.get("type").cloned().flatten();
        let stored_subtype = stored.get("subtype").cloned().flatten();

        match (stored_type, stored_subtype) {
            (Some(t), Some(s)) if t == row_type && s == row_subtype => Ok(true),
            (Some(t), Some(s)) => {
                warn!(
                    lemma = compound.lemma.as_str(),
                    row_type,
                    row_subtype,
                    stored_type = t.as_str(),
                    stored_subtype = s.as_str(),
                    "type/subtype conflict with stored compound; row dropped"
                );
                summary.conflicts += 1;
                Ok(false)
            }
            _ => {
                // one-time upgrade from untyped to typed
                self.store
                    .set_node_properties(
                        COMPOUND_LABEL,
                        &lemma_props,
                        &vec![
                            ("type", PropertyValue::str(row_type)),
                            ("subtype", PropertyValue::str(row_subtype)),
                        ],
                    )
                    .await?;
                Ok(true)
            }
        }
    }

    /// Parses one compound row: lemma from the first populated cell,
    /// occurrence count from the first numeric cell right of it. In the
    /// typed layout the count's column selects the type/subtype headers.
    fn parse_row(
        &self,
        row: &[Data],
        row_num: usize,
        headers: Option<(&[Data], &[Data])>,
    ) -> ImportResult<Option<Compound>> {
        let Some(lemma_col) = first_populated_col(row) else {
            return Ok(None);
        };
        let Some(lemma) = string_cell(row, lemma_col, row_num)? else {
            return Ok(None);
        };
        let mut compound = Compound::new(lemma);

        if let Some(count_col) = first_numeric_col(row, lemma_col + 1) {
            compound.occurrences = int_cell(row, count_col, row_num)?;
            if let Some((type_row, subtype_row)) = headers {
                compound.compound_type = Some(type_header_at(type_row, count_col)?);
                compound.subtype = Some(subtype_header_at(subtype_row, count_col)?);
            }
        }
        if compound.occurrences <= 0 {
            return Err(ImportError::MissingField {
                row: row_num,
                field: "occurrence count",
            });
        }
        Ok(Some(compound))
    }
}

/// Row 1: author name, century of birth, century of death.
fn parse_author(row: &[Data]) -> ImportResult<Author> {
    let name = string_cell(row, 0, 1)
        .map_err(|e| ImportError::InvalidHeader(e.to_string()))?
        .unwrap_or_default();
    let century_of_birth =
        int_cell(row, 1, 1).map_err(|e| ImportError::InvalidHeader(e.to_string()))?;
    let century_of_death =
        int_cell(row, 2, 1).map_err(|e| ImportError::InvalidHeader(e.to_string()))?;
    let author = Author {
        name,
        century_of_birth,
        century_of_death,
    };
    if !author.is_valid() {
        return Err(ImportError::InvalidHeader(format!(
            "author block invalid: name '{}', centuries {}/{}",
            author.name, author.century_of_birth, author.century_of_death
        )));
    }
    Ok(author)
}

/// Rows 2-3: (title, acronym) then (genre, subgenre).
fn parse_work(title_row: &[Data], genre_row: &[Data]) -> ImportResult<Work> {
    let header_cell = |row: &[Data], col: usize, row_num: usize| {
        string_cell(row, col, row_num)
            .map_err(|e| ImportError::InvalidHeader(e.to_string()))
            .map(Option::unwrap_or_default)
    };
    let work = Work {
        title: header_cell(title_row, 0, 2)?,
        acronym: header_cell(title_row, 1, 2)?,
        genre: header_cell(genre_row, 0, 3)?,
        subgenre: header_cell(genre_row, 1, 3)?,
    };
    if !work.is_valid() {
        return Err(ImportError::InvalidHeader(format!(
            "work block invalid: title '{}', genre '{}', subgenre '{}', acronym '{}'",
            work.title, work.genre, work.subgenre, work.acronym
        )));
    }
    Ok(work)
}

fn author_props(author: &Author) -> Properties {
    vec![
        ("name", PropertyValue::str(author.name.as_str())),
        ("centuryOfBirth", PropertyValue::Int(author.century_of_birth)),
        ("centuryOfDeath", PropertyValue::Int(author.century_of_death)),
    ]
}

fn work_props(work: &Work) -> Properties {
    vec![
        ("title", PropertyValue::str(work.title.as_str())),
        ("genre", PropertyValue::str(work.genre.as_str())),
        ("subgenre", PropertyValue::str(work.subgenre.as_str())),
        ("acronym", PropertyValue::str(work.acronym.as_str())),
    ]
}

/// Nearest non-empty type header at or left of `col`. Labels are sparse:
/// each one applies rightward until the next.
fn type_header_at(type_row: &[Data], col: usize) -> ImportResult<String> {
    for pos in (0..=col).rev() {
        if let Some(Data::String(s)) = type_row.get(pos) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }
    Err(ImportError::InvalidHeader(format!(
        "no type header at or left of column {col}"
    )))
}

/// Subtype header directly above `col`; numeric labels normalize to
/// their integer textual form.
fn subtype_header_at(subtype_row: &[Data], col: usize) -> ImportResult<String> {
    string_cell(subtype_row, col, 5)
        .map_err(|e| ImportError::InvalidHeader(e.to_string()))?
        .ok_or_else(|| {
            ImportError::InvalidHeader(format!("subtype header missing at column {col}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_header_scans_leftward() {
        let row = vec![
            Data::Empty,
            Data::String("Determinative".to_string()),
            Data::Empty,
            Data::Empty,
            Data::String("Grecisms".to_string()),
            Data::Empty,
        ];
        assert_eq!(type_header_at(&row, 3).unwrap(), "Determinative");
        assert_eq!(type_header_at(&row, 4).unwrap(), "Grecisms");
        assert_eq!(type_header_at(&row, 5).unwrap(), "Grecisms");
        assert!(type_header_at(&row, 0).is_err());
    }

    #[test]
    fn subtype_header_normalizes_numerics() {
        let row = vec![Data::String("Gr".to_string()), Data::Float(2.0), Data::Empty];
        assert_eq!(subtype_header_at(&row, 0).unwrap(), "Gr");
        assert_eq!(subtype_header_at(&row, 1).unwrap(), "2");
        assert!(matches!(
            subtype_header_at(&row, 2),
            Err(ImportError::InvalidHeader(_))
        ));
    }

    #[test]
    fn author_header_requires_centuries() {
        let row = vec![
            Data::String("Plautus".to_string()),
            Data::Float(-3.0),
            Data::Empty,
        ];
        assert!(matches!(
            parse_author(&row),
            Err(ImportError::InvalidHeader(_))
        ));
    }
}
