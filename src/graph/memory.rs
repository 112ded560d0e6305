// ==========================================
// Nominal Compounds - In-Memory Graph Store
// ==========================================
// Reproduces the MERGE contract over plain collections: a pattern
// matches any node/relationship carrying at least the listed properties
// with equal values, and creates one with exactly those properties
// otherwise. Used by the importer tests; no persistence.
// ==========================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::graph::store::{GraphStore, NodeRef, Properties, PropertyValue};
use crate::importer::error::{ImportError, ImportResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRecord {
    label: String,
    props: HashMap<&'static str, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RelRecord {
    rel_type: String,
    from: usize,
    to: usize,
    props: HashMap<&'static str, PropertyValue>,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<NodeRecord>,
    relationships: Vec<RelRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

fn matches(props: &HashMap<&'static str, PropertyValue>, pattern: &[(&'static str, PropertyValue)]) -> bool {
    pattern
        .iter()
        .all(|(key, value)| props.get(key) == Some(value))
}

fn to_map(props: &[(&'static str, PropertyValue)]) -> HashMap<&'static str, PropertyValue> {
    props.iter().cloned().collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ImportResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| ImportError::Internal(format!("memory store lock poisoned: {e}")))
    }

    fn find_node(inner: &Inner, label: &str, pattern: &[(&'static str, PropertyValue)]) -> Option<usize> {
        inner
            .nodes
            .iter()
            .position(|n| n.label == label && matches(&n.props, pattern))
    }

    // ===== inspection helpers for tests =====

    pub fn node_count(&self) -> usize {
        self.inner.lock().map(|i| i.nodes.len()).unwrap_or(0)
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.lock().map(|i| i.relationships.len()).unwrap_or(0)
    }

    pub fn label_count(&self, label: &str) -> usize {
        self.inner
            .lock()
            .map(|i| i.nodes.iter().filter(|n| n.label == label).count())
            .unwrap_or(0)
    }

    pub fn relationship_type_count(&self, rel_type: &str) -> usize {
        self.inner
            .lock()
            .map(|i| {
                i.relationships
                    .iter()
                    .filter(|r| r.rel_type == rel_type)
                    .count()
            })
            .unwrap_or(0)
    }

    /// True when a relationship of the given type links nodes matching the
    /// two endpoint patterns.
    pub fn has_relationship(&self, rel_type: &str, from: NodeRef<'_>, to: NodeRef<'_>) -> bool {
        let Ok(inner) = self.inner.lock() else {
            return false;
        };
        inner.relationships.iter().any(|rel| {
            if rel.rel_type != rel_type {
                return false;
            }
            let from_node = &inner.nodes[rel.from];
            let to_node = &inner.nodes[rel.to];
            from_node.label == from.label
                && matches(&from_node.props, from.match_props)
                && to_node.label == to.label
                && matches(&to_node.props, to.match_props)
        })
    }

    /// The named property of the first node matching label + pattern.
    pub fn node_property(
        &self,
        label: &str,
        pattern: &[(&'static str, PropertyValue)],
        key: &str,
    ) -> Option<PropertyValue> {
        let inner = self.inner.lock().ok()?;
        let idx = Self::find_node(&inner, label, pattern)?;
        inner.nodes[idx].props.get(key).cloned()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn upsert_node(
        &self,
        label: &'static str,
        match_props: &Properties,
    ) -> ImportResult<()> {
        let mut inner = self.lock()?;
        if Self::find_node(&inner, label, match_props).is_none() {
            inner.nodes.push(NodeRecord {
                label: label.to_string(),
                props: to_map(match_props),
            });
        }
        Ok(())
    }

    async fn upsert_relationship(
        &self,
        rel_type: &'static str,
        from: NodeRef<'_>,
        to: NodeRef<'_>,
        rel_props: &Properties,
    ) -> ImportResult<()> {
        let mut inner = self.lock()?;
        // MATCH + MERGE: a missing endpoint creates nothing.
        let (Some(from_idx), Some(to_idx)) = (
            Self::find_node(&inner, from.label, from.match_props),
            Self::find_node(&inner, to.label, to.match_props),
        ) else {
            return Ok(());
        };
        let exists = inner.relationships.iter().any(|r| {
            r.rel_type == rel_type
                && r.from == from_idx
                && r.to == to_idx
                && matches(&r.props, rel_props)
        });
        if !exists {
            inner.relationships.push(RelRecord {
                rel_type: rel_type.to_string(),
                from: from_idx,
                to: to_idx,
                props: to_map(rel_props),
            });
        }
        Ok(())
    }

    async fn node_exists(
        &self,
        label: &'static str,
        match_props: &Properties,
    ) -> ImportResult<bool> {
        let inner = self.lock()?;
        Ok(Self::find_node(&inner, label, match_props).is_some())
    }

    async fn fetch_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        keys: &[&'static str],
    ) -> ImportResult<Option<HashMap<&'static str, Option<String>>>> {
        let inner = self.lock()?;
        let Some(idx) = Self::find_node(&inner, label, match_props) else {
            return Ok(None);
        };
        let node = &inner.nodes[idx];
        Ok(Some(
            keys.iter()
                .map(|key| (*key, node.props.get(key).map(PropertyValue::as_text)))
                .collect(),
        ))
    }

    async fn set_node_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        updates: &Properties,
    ) -> ImportResult<()> {
        let mut inner = self.lock()?;
        for node in inner.nodes.iter_mut() {
            if node.label == label && matches(&node.props, match_props) {
                for (key, value) in updates {
                    node.props.insert(key, value.clone());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(value: &str) -> Properties {
        vec![("lemma", PropertyValue::str(value))]
    }

    #[tokio::test]
    async fn upsert_node_is_idempotent() {
        let store = MemoryStore::new();
        store.upsert_node("NominalCompound", &lemma("a")).await.unwrap();
        store.upsert_node("NominalCompound", &lemma("a")).await.unwrap();
        assert_eq!(store.node_count(), 1);
    }

    #[tokio::test]
    async fn pattern_matching_ignores_extra_properties() {
        let store = MemoryStore::new();
        let full = vec![
            ("lemma", PropertyValue::str("a")),
            ("type", PropertyValue::str("Determinative")),
        ];
        store.upsert_node("NominalCompound", &full).await.unwrap();
        // A lemma-only merge must match the richer node, not duplicate it.
        store.upsert_node("NominalCompound", &lemma("a")).await.unwrap();
        assert_eq!(store.node_count(), 1);
        assert!(store.node_exists("NominalCompound", &lemma("a")).await.unwrap());
    }

    #[tokio::test]
    async fn relationship_upsert_requires_both_endpoints() {
        let store = MemoryStore::new();
        store.upsert_node("NominalCompound", &lemma("a")).await.unwrap();
        store
            .upsert_relationship(
                "DUPLICATE_OF",
                NodeRef::new("NominalCompound", &lemma("missing")),
                NodeRef::new("NominalCompound", &lemma("a")),
                &vec![],
            )
            .await
            .unwrap();
        assert_eq!(store.relationship_count(), 0);
    }

    #[tokio::test]
    async fn set_properties_then_fetch() {
        let store = MemoryStore::new();
        store.upsert_node("NominalCompound", &lemma("a")).await.unwrap();
        store
            .set_node_properties(
                "NominalCompound",
                &lemma("a"),
                &vec![("type", PropertyValue::str("Grecisms"))],
            )
            .await
            .unwrap();
        let props = store
            .fetch_properties("NominalCompound", &lemma("a"), &["type", "subtype"])
            .await
            .unwrap()
            .expect("node should exist");
        assert_eq!(props["type"].as_deref(), Some("Grecisms"));
        assert_eq!(props["subtype"], None);
    }
}
