// ==========================================
// Nominal Compounds - Master Sheet Importer
// ==========================================
// Turns the master compound sheet into NominalCompound/Member nodes and
// FORMED_BY relationships. Row layout: lemma, lexical category, type,
// subtype, then up to 4 (member lemma, member category) column pairs.
// ==========================================

use calamine::{Data, Range};
use tracing::{info, warn};

use crate::domain::{Compound, CompoundSheetSummary, Member};
use crate::graph::{GraphStore, NodeRef, Properties, PropertyValue};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_reader::string_cell;
use crate::importer::{COMPOUND_LABEL, FORMED_BY, MEMBER_LABEL};

/// Maximum number of member slots per compound row.
const MAX_MEMBERS: usize = 4;

/// Match properties identifying a compound node: lemma plus whichever
/// classification fields the record carries. The greek form never takes
/// part in matching.
pub(crate) fn compound_match_props(compound: &Compound) -> Properties {
    let mut props = vec![("lemma", PropertyValue::str(compound.lemma.as_str()))];
    if let Some(category) = &compound.lexical_category {
        props.push(("lexicalCategory", PropertyValue::str(category.as_str())));
    }
    if let Some(compound_type) = &compound.compound_type {
        props.push(("type", PropertyValue::str(compound_type.as_str())));
    }
    if let Some(subtype) = &compound.subtype {
        props.push(("subtype", PropertyValue::str(subtype.as_str())));
    }
    props
}

pub struct CompoundSheetImporter<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> CompoundSheetImporter<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Imports the whole master sheet. Per-row failures are logged and
    /// counted; only workbook-level problems abort the sheet.
    pub async fn run(&self, sheet: &Range<Data>) -> ImportResult<CompoundSheetSummary> {
        let mut summary = CompoundSheetSummary::default();
        for (idx, row) in sheet.rows().enumerate() {
            // first row is the column header
            if idx == 0 {
                continue;
            }
            let row_num = idx + 1;
            match self.import_row(row, row_num, &mut summary).await {
                Ok(()) => {}
                Err(err) if err.is_sheet_fatal() => return Err(err),
                Err(err) => {
                    warn!(row = row_num, error = %err, "compound row skipped");
                    summary.errors += 1;
                }
            }
        }
        info!(
            compounds = summary.compounds_created,
            members = summary.members_processed,
            relationships = summary.relationships_created,
            grecisms = summary.grecisms_found,
            empty = summary.empty_rows,
            errors = summary.errors,
            "master compound sheet done"
        );
        Ok(summary)
    }

    async fn import_row(
        &self,
        row: &[Data],
        row_num: usize,
        summary: &mut CompoundSheetSummary,
    ) -> ImportResult<()> {
        let Some(mut compound) = parse_compound(row, row_num)? else {
            summary.empty_rows += 1;
            return Ok(());
        };
        split_grecism_lemma(&mut compound, row_num)?;
        if compound.greek_form.is_some() {
            summary.grecisms_found += 1;
        }

        let mut node_props = compound_match_props(&compound);
        if let Some(greek) = &compound.greek_form {
            node_props.push(("greekForm", PropertyValue::str(greek.as_str())));
        }
        self.store.upsert_node(COMPOUND_LABEL, &node_props).await?;
        summary.compounds_created += 1;

        let compound_match = compound_match_props(&compound);
        for slot in 1..=MAX_MEMBERS {
            let Some(member) = parse_member(row, 2 + slot * 2, row_num)? else {
                continue;
            };
            let member_props = vec![
                ("lemma", PropertyValue::str(member.lemma.as_str())),
                (
                    "lexicalCategory",
                    PropertyValue::str(member.lexical_category.as_str()),
                ),
            ];
            self.store.upsert_node(MEMBER_LABEL, &member_props).await?;
            summary.members_processed += 1;
            self.store
                .upsert_relationship(
                    FORMED_BY,
                    NodeRef::new(COMPOUND_LABEL, &compound_match),
                    NodeRef::new(MEMBER_LABEL, &member_props),
                    &vec![("position", PropertyValue::Int(slot as i64))],
                )
                .await?;
            summary.relationships_created += 1;
        }

        if summary.compounds_created % 100 == 0 {
            info!(rows = summary.compounds_created, "rows processed");
        }
        Ok(())
    }
}

/// Parses the four head columns of a master row. A row with all four
/// blank is an empty row (`None`); any partial presence is an error.
fn parse_compound(row: &[Data], row_num: usize) -> ImportResult<Option<Compound>> {
    let lemma = string_cell(row, 0, row_num)?;
    let category = string_cell(row, 1, row_num)?;
    let compound_type = string_cell(row, 2, row_num)?;
    let subtype = string_cell(row, 3, row_num)?;

    if lemma.is_none() && category.is_none() && compound_type.is_none() && subtype.is_none() {
        return Ok(None);
    }
    let Some(lemma) = lemma else {
        return Err(ImportError::MissingField {
            row: row_num,
            field: "lemma",
        });
    };
    let Some(category) = category else {
        return Err(ImportError::MissingField {
            row: row_num,
            field: "lexical category",
        });
    };
    let (compound_type, subtype) = match (compound_type, subtype) {
        (Some(t), Some(s)) => (t, s),
        (Some(_), None) => {
            return Err(ImportError::MissingField {
                row: row_num,
                field: "subtype",
            })
        }
        (None, _) => {
            return Err(ImportError::MissingField {
                row: row_num,
                field: "type",
            })
        }
    };

    Ok(Some(Compound {
        lemma,
        lexical_category: Some(category),
        compound_type: Some(compound_type),
        subtype: Some(subtype),
        greek_form: None,
        occurrences: 0,
    }))
}

/// Grecism lemmas come as `"<latin> (<greek>)"`. The parenthetical and
/// the Grecism classification must agree; when they do, the lemma is
/// split into the plain Latin form and the Greek original.
fn split_grecism_lemma(compound: &mut Compound, row_num: usize) -> ImportResult<()> {
    match compound.lemma.split_once(" (") {
        None => {
            if compound.is_grecism() {
                return Err(ImportError::InvariantViolation {
                    row: row_num,
                    message: format!(
                        "Grecism '{}' is missing the Greek original",
                        compound.lemma
                    ),
                });
            }
        }
        Some((latin, rest)) => {
            if !compound.is_grecism() {
                return Err(ImportError::InvariantViolation {
                    row: row_num,
                    message: format!(
                        "'{}' carries a Greek original but is not classified as a Grecism",
                        compound.lemma
                    ),
                });
            }
            let Some((greek, _)) = rest.split_once(')') else {
                return Err(ImportError::InvariantViolation {
                    row: row_num,
                    message: format!("unterminated Greek original in '{}'", compound.lemma),
                });
            };
            compound.greek_form = Some(greek.to_string());
            compound.lemma = latin.to_string();
        }
    }
    Ok(())
}

/// Parses the member slot starting at `col` (lemma, category pair). A
/// fully blank slot is `None`; one-sided presence is an error.
fn parse_member(row: &[Data], col: usize, row_num: usize) -> ImportResult<Option<Member>> {
    let lemma = string_cell(row, col, row_num)?;
    let category = string_cell(row, col + 1, row_num)?;
    match (lemma, category) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(ImportError::MissingField {
            row: row_num,
            field: "member lexical category",
        }),
        (None, Some(_)) => Err(ImportError::MissingField {
            row: row_num,
            field: "member lemma",
        }),
        (Some(lemma), Some(lexical_category)) => Ok(Some(Member {
            lemma,
            lexical_category,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grecism(ty: &str, sub: &str, lemma: &str) -> Compound {
        Compound {
            lemma: lemma.to_string(),
            lexical_category: Some("noun".to_string()),
            compound_type: Some(ty.to_string()),
            subtype: Some(sub.to_string()),
            greek_form: None,
            occurrences: 0,
        }
    }

    #[test]
    fn grecism_lemma_is_split() {
        let mut compound = grecism("Grecisms", "Gr", "mundigenus (κοσμογενής)");
        split_grecism_lemma(&mut compound, 2).unwrap();
        assert_eq!(compound.lemma, "mundigenus");
        assert_eq!(compound.greek_form.as_deref(), Some("κοσμογενής"));
    }

    #[test]
    fn parenthetical_without_grecism_marker_is_rejected() {
        let mut compound = grecism("Determinative", "N+N", "mundigenus (κοσμογενής)");
        let err = split_grecism_lemma(&mut compound, 3).unwrap_err();
        assert!(matches!(err, ImportError::InvariantViolation { row: 3, .. }));
    }

    #[test]
    fn grecism_marker_without_parenthetical_is_rejected() {
        let mut compound = grecism("Grecisms", "Gr", "mundigenus");
        let err = split_grecism_lemma(&mut compound, 7).unwrap_err();
        assert!(matches!(err, ImportError::InvariantViolation { row: 7, .. }));
    }

    #[test]
    fn member_slot_must_be_fully_populated_or_blank() {
        let row = vec![
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::String("aqua".to_string()),
            Data::Empty,
        ];
        assert!(matches!(
            parse_member(&row, 4, 2).unwrap_err(),
            ImportError::MissingField {
                field: "member lexical category",
                ..
            }
        ));
        assert_eq!(parse_member(&row, 6, 2).unwrap(), None);
    }
}
