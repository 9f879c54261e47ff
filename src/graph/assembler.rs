//! Graph assembly: fold query triples into a deduplicated node/link graph
//!
//! Input rows arrive already filtered by the store query (label whitelist,
//! optional focus entity), so the assembler trusts the shape and performs
//! a single forward pass with two insertion-ordered accumulators.

use super::entity::{Entity, GraphRow};
use super::property::PropertyMap;
use super::types::EntityId;
use super::GraphResult;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A renderable node: id, display label, and flattened properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

impl GraphNode {
    fn from_entity(id: &EntityId, entity: &Entity) -> Self {
        GraphNode {
            id: id.to_string(),
            label: entity.display_label().to_string(),
            properties: entity.properties.clone(),
        }
    }
}

/// A renderable link, unique by structural equality of the whole triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub rel_type: String,
}

/// Assembled graph, ready for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Assembly options
///
/// The store does not normalize (A,B,TYPE) vs (B,A,TYPE) into one
/// undirected link, and by default neither does the assembler: both keys
/// are retained when both appear, mirroring the store's literal output.
/// Consumers that want one link per undirected pair can opt in to
/// normalization, which orders each endpoint pair canonically before
/// dedup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    pub normalize_direction: bool,
}

/// Folds (source, relationship, target) triples into a deduplicated graph
///
/// Pure and request-scoped: every call builds fresh accumulators, so
/// concurrent invocations share nothing.
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler {
    options: AssembleOptions,
}

impl GraphAssembler {
    /// Create an assembler with default options (direction preserved)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AssembleOptions) -> Self {
        GraphAssembler { options }
    }

    /// Assemble a deduplicated graph from query triples
    ///
    /// `focus` is pass-through context: when set, the caller has already
    /// restricted `rows` to those touching the focused entity, and the
    /// assembler does no filtering of its own.
    ///
    /// Invariants:
    /// - exactly one node per distinct entity identity (last-seen
    ///   properties win on repeats)
    /// - exactly one link per distinct (source, target, type) triple
    /// - any entity without an identity aborts the whole call
    pub fn assemble(
        &self,
        rows: impl IntoIterator<Item = GraphRow>,
        focus: Option<&str>,
    ) -> GraphResult<GraphData> {
        let mut nodes: IndexMap<EntityId, GraphNode> = IndexMap::new();
        let mut links: IndexSet<GraphLink> = IndexSet::new();
        let mut row_count = 0usize;

        for row in rows {
            row_count += 1;
            let source_id = row.source.require_identity("source")?.clone();
            let target_id = row.target.require_identity("target")?.clone();

            // Last write wins on repeated identities
            nodes.insert(source_id.clone(), GraphNode::from_entity(&source_id, &row.source));
            nodes.insert(target_id.clone(), GraphNode::from_entity(&target_id, &row.target));

            let (a, b) = if self.options.normalize_direction && target_id < source_id {
                (target_id, source_id)
            } else {
                (source_id, target_id)
            };
            links.insert(GraphLink {
                source: a.to_string(),
                target: b.to_string(),
                rel_type: row.relationship.rel_type.as_str().to_string(),
            });
        }

        debug!(
            rows = row_count,
            nodes = nodes.len(),
            links = links.len(),
            focus = focus.unwrap_or(""),
            "assembled graph"
        );

        Ok(GraphData {
            nodes: nodes.into_values().collect(),
            links: links.into_iter().collect(),
        })
    }
}
