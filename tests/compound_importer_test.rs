// ==========================================
// Master Compound Sheet - integration tests
// ==========================================
// Full sheet runs against the in-memory store.
// ==========================================

mod test_helpers;

use calamine::Data;
use nominal_compounds::importer::{COMPOUND_LABEL, FORMED_BY, MEMBER_LABEL};
use nominal_compounds::logging;
use nominal_compounds::{CompoundSheetImporter, MemoryStore, NodeRef, PropertyValue};
use test_helpers::{e, f, s, sheet};

fn header() -> Vec<Data> {
    vec![s("Lemma"), s("Category"), s("Type"), s("Subtype")]
}

fn lemma(value: &str) -> Vec<(&'static str, PropertyValue)> {
    vec![("lemma", PropertyValue::str(value))]
}

#[tokio::test]
async fn full_row_creates_compound_members_and_relationships() {
    logging::init_test();
    let store = MemoryStore::new();
    let sheet = sheet(vec![
        header(),
        vec![
            s("mundipotens"),
            s("adjective"),
            s("Determinative"),
            s("N+A"),
            s("mundus"),
            s("noun"),
            s("potens"),
            s("adjective"),
        ],
    ]);

    let summary = CompoundSheetImporter::new(&store).run(&sheet).await.unwrap();

    assert_eq!(summary.compounds_created, 1);
    assert_eq!(summary.members_processed, 2);
    assert_eq!(summary.relationships_created, 2);
    assert_eq!(summary.errors, 0);
    assert_eq!(store.label_count(COMPOUND_LABEL), 1);
    assert_eq!(store.label_count(MEMBER_LABEL), 2);
    assert!(store.has_relationship(
        FORMED_BY,
        NodeRef::new(COMPOUND_LABEL, &lemma("mundipotens")),
        NodeRef::new(MEMBER_LABEL, &lemma("mundus")),
    ));
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let store = MemoryStore::new();
    let sheet = sheet(vec![
        header(),
        vec![
            s("mundipotens"),
            s("adjective"),
            s("Determinative"),
            s("N+A"),
            s("mundus"),
            s("noun"),
        ],
    ]);

    let importer = CompoundSheetImporter::new(&store);
    importer.run(&sheet).await.unwrap();
    let nodes = store.node_count();
    let relationships = store.relationship_count();

    importer.run(&sheet).await.unwrap();
    assert_eq!(store.node_count(), nodes);
    assert_eq!(store.relationship_count(), relationships);
}

#[tokio::test]
async fn grecism_lemma_is_split_into_latin_and_greek() {
    let store = MemoryStore::new();
    let sheet = sheet(vec![
        header(),
        vec![
            s("mundigenus (κοσμογενής)"),
            s("noun"),
            s("Grecisms"),
            s("Gr"),
        ],
    ]);

    let summary = CompoundSheetImporter::new(&store).run(&sheet).await.unwrap();

    assert_eq!(summary.grecisms_found, 1);
    assert!(store
        .node_property(COMPOUND_LABEL, &lemma("mundigenus"), "greekForm")
        .is_some_and(|v| v == PropertyValue::str("κοσμογενής")));
    // the raw lemma with the parenthetical must not survive as a node
    assert_eq!(
        store.node_property(COMPOUND_LABEL, &lemma("mundigenus (κοσμογενής)"), "lemma"),
        None
    );
}

#[tokio::test]
async fn numeric_subtype_normalizes_to_integer_text() {
    let store = MemoryStore::new();
    let sheet = sheet(vec![
        header(),
        vec![s("duplex"), s("adjective"), s("Numeral"), f(2.0)],
    ]);

    CompoundSheetImporter::new(&store).run(&sheet).await.unwrap();

    assert_eq!(
        store.node_property(COMPOUND_LABEL, &lemma("duplex"), "subtype"),
        Some(PropertyValue::str("2"))
    );
}

#[tokio::test]
async fn member_slots_may_be_sparse() {
    let store = MemoryStore::new();
    // slots 1, 2 and 4 populated, slot 3 blank
    let sheet = sheet(vec![
        header(),
        vec![
            s("quadruplex"),
            s("adjective"),
            s("Determinative"),
            s("N+A"),
            s("a"),
            s("noun"),
            s("b"),
            s("noun"),
            e(),
            e(),
            s("d"),
            s("noun"),
        ],
    ]);

    let summary = CompoundSheetImporter::new(&store).run(&sheet).await.unwrap();

    assert_eq!(summary.members_processed, 3);
    assert_eq!(store.relationship_type_count(FORMED_BY), 3);
}

#[tokio::test]
async fn bad_rows_are_counted_and_skipped() {
    let store = MemoryStore::new();
    let sheet = sheet(vec![
        header(),
        // missing lexical category
        vec![s("mundigenus"), e(), s("Determinative"), s("N+N")],
        // Grecism marker without the Greek original
        vec![s("caeligena"), s("noun"), s("Grecisms"), s("Gr")],
        // blank separator row
        vec![e(), e(), e(), e()],
        vec![s("montivagus"), s("adjective"), s("Determinative"), s("N+V")],
    ]);

    let summary = CompoundSheetImporter::new(&store).run(&sheet).await.unwrap();

    assert_eq!(summary.errors, 2);
    assert_eq!(summary.empty_rows, 1);
    assert_eq!(summary.compounds_created, 1);
    assert_eq!(store.label_count(COMPOUND_LABEL), 1);
}
