// ==========================================
// Nominal Compounds - Neo4j Graph Store
// ==========================================
// neo4rs-backed implementation. Labels and property keys are crate
// constants, so they are interpolated into the Cypher text (backquoted);
// all values travel as bolt parameters.
// ==========================================

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query};
use std::collections::HashMap;
use tracing::debug;

use crate::graph::store::{GraphStore, NodeRef, Properties, PropertyValue};
use crate::importer::error::ImportResult;

pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connects to the bolt endpoint, scoped to the named database.
    pub async fn connect(
        uri: &str,
        user: &str,
        password: &str,
        db_name: &str,
    ) -> ImportResult<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(db_name)
            .build()?;
        let graph = Graph::connect(config).await?;
        debug!(uri, db_name, "connected to graph database");
        Ok(Self { graph })
    }
}

/// `key: $prefixkey, ...` fragment for a property match pattern.
fn prop_pattern(prefix: &str, props: &[(&'static str, PropertyValue)]) -> String {
    props
        .iter()
        .map(|(key, _)| format!("`{key}`: ${prefix}{key}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Binds every property as a named parameter with the given prefix.
fn bind(q: Query, prefix: &str, props: &[(&'static str, PropertyValue)]) -> Query {
    props.iter().fold(q, |q, (key, value)| {
        let name = format!("{prefix}{key}");
        match value {
            PropertyValue::Str(s) => q.param(&name, s.as_str()),
            PropertyValue::Int(i) => q.param(&name, *i),
        }
    })
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn upsert_node(
        &self,
        label: &'static str,
        match_props: &Properties,
    ) -> ImportResult<()> {
        let cypher = format!("MERGE (n:`{label}` {{{}}})", prop_pattern("", match_props));
        self.graph.run(bind(query(&cypher), "", match_props)).await?;
        Ok(())
    }

    async fn upsert_relationship(
        &self,
        rel_type: &'static str,
        from: NodeRef<'_>,
        to: NodeRef<'_>,
        rel_props: &Properties,
    ) -> ImportResult<()> {
        let rel_pattern = if rel_props.is_empty() {
            String::new()
        } else {
            format!(" {{{}}}", prop_pattern("rel_", rel_props))
        };
        let cypher = format!(
            "MATCH (a:`{}` {{{}}}), (b:`{}` {{{}}}) MERGE (a)-[r:`{rel_type}`{rel_pattern}]->(b)",
            from.label,
            prop_pattern("from_", from.match_props),
            to.label,
            prop_pattern("to_", to.match_props),
        );
        let mut q = bind(query(&cypher), "from_", from.match_props);
        q = bind(q, "to_", to.match_props);
        q = bind(q, "rel_", rel_props);
        self.graph.run(q).await?;
        Ok(())
    }

    async fn node_exists(
        &self,
        label: &'static str,
        match_props: &Properties,
    ) -> ImportResult<bool> {
        let cypher = format!(
            "MATCH (n:`{label}` {{{}}}) RETURN count(n) AS total",
            prop_pattern("", match_props)
        );
        let mut stream = self
            .graph
            .execute(bind(query(&cypher), "", match_props))
            .await?;
        if let Some(row) = stream.next().await? {
            let total: i64 = row.get("total").unwrap_or(0);
            return Ok(total > 0);
        }
        Ok(false)
    }

    async fn fetch_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        keys: &[&'static str],
    ) -> ImportResult<Option<HashMap<&'static str, Option<String>>>> {
        let returns = keys
            .iter()
            .map(|key| format!("n.`{key}` AS `{key}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let cypher = format!(
            "MATCH (n:`{label}` {{{}}}) RETURN {returns} LIMIT 1",
            prop_pattern("", match_props)
        );
        let mut stream = self
            .graph
            .execute(bind(query(&cypher), "", match_props))
            .await?;
        let Some(row) = stream.next().await? else {
            return Ok(None);
        };
        let mut props = HashMap::new();
        for key in keys {
            let value: Option<String> = row.get(key).unwrap_or(None);
            props.insert(*key, value);
        }
        Ok(Some(props))
    }

    async fn set_node_properties(
        &self,
        label: &'static str,
        match_props: &Properties,
        updates: &Properties,
    ) -> ImportResult<()> {
        let assignments = updates
            .iter()
            .map(|(key, _)| format!("n.`{key}` = $set_{key}"))
            .collect::<Vec<_>>()
            .join(", ");
        let cypher = format!(
            "MATCH (n:`{label}` {{{}}}) SET {assignments}",
            prop_pattern("", match_props)
        );
        let mut q = bind(query(&cypher), "", match_props);
        q = bind(q, "set_", updates);
        self.graph.run(q).await?;
        Ok(())
    }
}
