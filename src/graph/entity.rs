//! Entity and relationship projections of store query results
//!
//! These are read-only snapshots of what the store returned for one
//! request. The core never creates, mutates, or deletes store state; it
//! only re-shapes these projections into graph and summary outputs.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EntityId, Label, RelType};
use super::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// A typed node as returned by the store
///
/// `identity` is optional because the driver can hand back rows without
/// one; the aggregation core is the validation point and rejects such
/// rows with [`GraphError::MalformedRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque stable identity, unique within a query result
    pub identity: Option<EntityId>,

    /// Ordered labels; the first one is the display label
    pub labels: Vec<Label>,

    /// Scalar properties; domain/hostname/record-type entities carry
    /// `name`, command-execution entities carry `key`
    pub properties: PropertyMap,
}

impl Entity {
    /// Create an entity with one label and no properties
    pub fn new(identity: impl Into<EntityId>, label: impl Into<Label>) -> Self {
        Entity {
            identity: Some(identity.into()),
            labels: vec![label.into()],
            properties: PropertyMap::new(),
        }
    }

    /// Create an entity with multiple labels
    pub fn new_with_labels(identity: impl Into<EntityId>, labels: Vec<Label>) -> Self {
        Entity {
            identity: Some(identity.into()),
            labels,
            properties: PropertyMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Display label: first label, "Unknown" when the store returned none
    pub fn display_label(&self) -> &str {
        self.labels.first().map(Label::as_str).unwrap_or("Unknown")
    }

    /// Whether any of this entity's labels matches
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// The human-readable `name` property, if present
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(PropertyValue::as_str)
    }

    /// The `key` property carried by command-execution entities
    pub fn key(&self) -> Option<&str> {
        self.properties.get("key").and_then(PropertyValue::as_str)
    }

    /// Identity, or a malformed-row rejection naming the offending slot
    pub fn require_identity(&self, slot: &str) -> GraphResult<&EntityId> {
        self.identity.as_ref().ok_or_else(|| {
            GraphError::MalformedRow(format!("{} entity has no identity", slot))
        })
    }
}

/// A typed, directed edge between two entities
///
/// The direction the store returns is not semantically authoritative for
/// rendering; dedup is keyed on (source identity, target identity, type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub rel_type: RelType,
}

impl Relationship {
    pub fn new(rel_type: impl Into<RelType>) -> Self {
        Relationship {
            rel_type: rel_type.into(),
        }
    }
}

/// One (source, relationship, target) triple from the graph query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRow {
    pub source: Entity,
    pub relationship: Relationship,
    pub target: Entity,
}

impl GraphRow {
    pub fn new(source: Entity, relationship: Relationship, target: Entity) -> Self {
        GraphRow {
            source,
            relationship,
            target,
        }
    }
}

/// One root domain plus its one-hop adjacency from the rollup query
///
/// `domain` is optional for the same reason entity identity is: the core
/// validates, and a root row with no name is malformed. A root with an
/// empty `adjacent` list is valid; absence of relationships is not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRow {
    pub domain: Option<String>,

    /// Adjacent entities reachable in one hop, with their labels
    pub adjacent: Vec<Entity>,

    /// Types of the relationships traversed to reach them
    pub relationship_types: Vec<String>,
}

impl DomainRow {
    pub fn new(domain: impl Into<String>) -> Self {
        DomainRow {
            domain: Some(domain.into()),
            adjacent: Vec::new(),
            relationship_types: Vec::new(),
        }
    }

    /// Builder-style adjacency append
    pub fn with_adjacent(mut self, entity: Entity) -> Self {
        self.adjacent.push(entity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        let entity = Entity::new("1", "DnsName");
        assert_eq!(entity.display_label(), "DnsName");

        let multi = Entity::new_with_labels("2", vec![Label::new("Hostname"), Label::new("Seen")]);
        assert_eq!(multi.display_label(), "Hostname");
        assert!(multi.has_label("Seen"));
        assert!(!multi.has_label("DnsName"));
    }

    #[test]
    fn test_unlabeled_entity_defaults_to_unknown() {
        let entity = Entity::new_with_labels("3", vec![]);
        assert_eq!(entity.display_label(), "Unknown");
    }

    #[test]
    fn test_name_and_key_properties() {
        let domain = Entity::new("1", "DnsName").with_property("name", "x.com");
        assert_eq!(domain.name(), Some("x.com"));
        assert_eq!(domain.key(), None);

        let run = Entity::new("2", "CommandRun").with_property("key", "run-1");
        assert_eq!(run.key(), Some("run-1"));
    }

    #[test]
    fn test_require_identity() {
        let ok = Entity::new("1", "DnsName");
        assert!(ok.require_identity("source").is_ok());

        let missing = Entity {
            identity: None,
            labels: vec![Label::new("DnsName")],
            properties: PropertyMap::new(),
        };
        let err = missing.require_identity("target").unwrap_err();
        assert_eq!(
            err,
            GraphError::MalformedRow("target entity has no identity".to_string())
        );
    }
}
