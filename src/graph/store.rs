// ==========================================
// Nominal Compounds - Graph Store Interface
// ==========================================
// Get-or-create (MERGE) semantics over labeled nodes and typed
// relationships. The store must treat match-then-create-if-absent as one
// atomic step; the importers hold no locks and rely on each write being
// visible before the next dependent read.
// ==========================================

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::importer::error::ImportResult;

/// A property value on a node or relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
}

impl PropertyValue {
    pub fn str(value: impl Into<String>) -> Self {
        PropertyValue::Str(value.into())
    }

    /// String rendering used for comparisons and reporting; integers use
    /// their decimal form.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Str(s) => s.clone(),
            PropertyValue::Int(i) => i.to_string(),
        }
    }
}

/// An ordered property list. Order is preserved so generated queries are
/// deterministic.
pub type Properties = Vec<(&'static str, PropertyValue)>;

/// One endpoint of a relationship upsert: a label plus the match
/// properties identifying the node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub label: &'static str,
    pub match_props: &'a [(&'static str, PropertyValue)],
}

impl<'a> NodeRef<'a> {
    pub fn new(label: &'static str, match_props: &'a [(&'static str, PropertyValue)]) -> Self {
        Self { label, match_props }
    }
}

/// The graph store contract required by the importers. All operations are
/// scoped to the database named at construction and must be idempotent
/// under the given match keys.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Creates the node if no node with the label and all match properties
    /// exists; otherwise a no-op.
    async fn upsert_node(&self, label: &'static str, match_props: &Properties)
        -> ImportResult<()>;

    /// Creates the relationship if absent. Both endpoints must already
    /// match; when either does not, nothing is created (mirroring Cypher
    /// MATCH + MERGE).
    async fn upsert_relationship(
        &self,
        rel_type: &'static str,
        from: NodeRef<'_>,
        to: NodeRef<'_>,
        rel_props: &Properties,
    ) -> ImportResult<()>;

    /// True when at least one node matches the label and properties.
    async fn node_exists(&self, label: &'static str, match_props: &Properties)
        -> ImportResult<bool>;

    /// Requested properties of the first matching node, or `None` when no
    /// node matches. Properties absent on the node come back as `None`
    /// entries in the map.
    async fn fetch_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        keys: &[&'static str],
    ) -> ImportResult<Option<HashMap<&'static str, Option<String>>>>;

    /// Sets properties on every node matching the label and match
    /// properties. Used only for the one-time type/subtype backfill.
    async fn set_node_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        updates: &Properties,
    ) -> ImportResult<()>;
}
