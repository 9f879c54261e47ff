//! Cypher queries and row decoding
//!
//! The label whitelist and the optional focus/search scoping live in the
//! queries, not in the aggregation core: the core trusts that the rows it
//! receives were already restricted upstream. Driver-specific value
//! representations (numeric identities, boxed integers) are unwrapped
//! here, at the boundary, so the core only ever sees plain strings and
//! integers.

use crate::graph::{DomainRow, Entity, EntityId, GraphRow, Label, PropertyMap, PropertyValue, Relationship};
use super::{StoreError, StoreResult};
use indexmap::IndexMap;
use neo4rs::{Node, Relation, Row};

/// All relevant entities and the relationships connecting them
pub(crate) const GRAPH_QUERY: &str = "
    MATCH (n)
    WHERE n:Command OR n:DnsName OR n:Hostname OR n:RecordType
    WITH n
    MATCH (n)-[r]-(m)
    WHERE m:Command OR m:DnsName OR m:Hostname OR m:RecordType OR m:CommandRun
    RETURN n, r, m LIMIT 10000
";

/// Same as [`GRAPH_QUERY`], restricted to rows touching one named entity
pub(crate) const GRAPH_QUERY_FOCUSED: &str = "
    MATCH (n)
    WHERE n:Command OR n:DnsName OR n:Hostname OR n:RecordType
    WITH n
    MATCH (n)-[r]-(m)
    WHERE m:Command OR m:DnsName OR m:Hostname OR m:RecordType OR m:CommandRun
    WITH n, r, m
    WHERE n.name = $domain OR m.name = $domain
    RETURN n, r, m LIMIT 10000
";

/// One row per (root domain, adjacent entity) pair; the rollup groups
/// them back into per-root rows. Roots without adjacency still yield one
/// row with null `related`.
pub(crate) const DOMAIN_QUERY: &str = "
    MATCH (d:DnsName)
    OPTIONAL MATCH (d)-[r]-(related)
    WHERE related:DnsName OR related:Hostname OR related:RecordType OR related:CommandRun
    RETURN id(d) AS rootId, d.name AS domain, related, type(r) AS relType
    ORDER BY rootId
";

/// Same as [`DOMAIN_QUERY`], restricted by substring match on the root
/// name (the store's native CONTAINS predicate, case-sensitive)
pub(crate) const DOMAIN_QUERY_FILTERED: &str = "
    MATCH (d:DnsName)
    WHERE d.name CONTAINS $search
    OPTIONAL MATCH (d)-[r]-(related)
    WHERE related:DnsName OR related:Hostname OR related:RecordType OR related:CommandRun
    RETURN id(d) AS rootId, d.name AS domain, related, type(r) AS relType
    ORDER BY rootId
";

fn decode_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Decode(e.to_string())
}

/// Project a driver node into the core's entity shape
///
/// Identities are numeric on the wire; they are stringified here so the
/// core treats them as opaque. Only scalar properties survive the
/// projection; the pipeline never writes anything else.
pub(crate) fn entity_from_node(node: &Node) -> Entity {
    let mut properties = PropertyMap::new();
    for key in node.keys() {
        if let Some(value) = scalar_property(node, key) {
            properties.insert(key.to_string(), value);
        }
    }
    Entity {
        identity: Some(EntityId::new(node.id().to_string())),
        labels: node.labels().iter().map(|l| Label::new(l.to_string())).collect(),
        properties,
    }
}

fn scalar_property(node: &Node, key: &str) -> Option<PropertyValue> {
    if let Ok(s) = node.get::<String>(key) {
        return Some(PropertyValue::String(s));
    }
    if let Ok(i) = node.get::<i64>(key) {
        return Some(PropertyValue::Integer(i));
    }
    if let Ok(b) = node.get::<bool>(key) {
        return Some(PropertyValue::Boolean(b));
    }
    if let Ok(f) = node.get::<f64>(key) {
        return Some(PropertyValue::Float(f));
    }
    None
}

/// Decode one (n, r, m) triple
pub(crate) fn decode_graph_row(row: &Row) -> StoreResult<GraphRow> {
    let n: Node = row.get("n").map_err(decode_err)?;
    let r: Relation = row.get("r").map_err(decode_err)?;
    let m: Node = row.get("m").map_err(decode_err)?;

    Ok(GraphRow::new(
        entity_from_node(&n),
        Relationship::new(r.typ().to_string()),
        entity_from_node(&m),
    ))
}

/// Group per-neighbor rows back into one [`DomainRow`] per root entity
///
/// Grouping is by root identity, not by name: two distinct root entities
/// sharing a name stay separate, and each later yields its own summary.
pub(crate) fn group_domain_rows(rows: &[Row]) -> StoreResult<Vec<DomainRow>> {
    let mut grouped: IndexMap<i64, DomainRow> = IndexMap::new();

    for row in rows {
        let root_id: i64 = row.get("rootId").map_err(decode_err)?;
        let entry = grouped.entry(root_id).or_insert_with(|| DomainRow {
            // Null names surface as None; the rollup rejects them
            domain: row.get::<String>("domain").ok(),
            adjacent: Vec::new(),
            relationship_types: Vec::new(),
        });

        // OPTIONAL MATCH misses leave both null
        if let Ok(related) = row.get::<Node>("related") {
            entry.adjacent.push(entity_from_node(&related));
        }
        if let Ok(rel_type) = row.get::<String>("relType") {
            if !entry.relationship_types.contains(&rel_type) {
                entry.relationship_types.push(rel_type);
            }
        }
    }

    Ok(grouped.into_values().collect())
}
