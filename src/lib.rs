//! Dnsgraph
//!
//! A queryable relationship graph over DNS observations — domain names,
//! hostnames, DNS record types, and command-execution records — collected
//! by an external pipeline and stored in Neo4j.
//!
//! # Architecture
//!
//! - [`graph`] — the aggregation core: pure transformations from raw
//!   entity/relationship result sets into a deduplicated node/link graph
//!   ([`graph::GraphAssembler`]) and per-domain rollup summaries
//!   ([`graph::RelationshipRollup`]).
//! - [`store`] — Bolt access to the external store: the two Cypher
//!   queries, per-request scoped sessions, and row decoding into the
//!   core's typed projections.
//! - [`http`] — axum endpoints (`/api/graph`, `/api/domains`,
//!   `/api/status`) and the embedded visualizer page.
//! - [`config`] — environment-driven bootstrap settings.
//!
//! # Example
//!
//! ```rust
//! use dnsgraph::graph::{Entity, GraphAssembler, GraphRow, Relationship};
//!
//! let rows = vec![GraphRow::new(
//!     Entity::new("1", "DnsName").with_property("name", "x.com"),
//!     Relationship::new("RESOLVES_TO"),
//!     Entity::new("2", "Hostname").with_property("name", "h.x.com"),
//! )];
//!
//! let data = GraphAssembler::new().assemble(rows, None).unwrap();
//! assert_eq!(data.nodes.len(), 2);
//! assert_eq!(data.links.len(), 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod http;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, StoreConfig};
pub use graph::{
    AssembleOptions, DomainRow, DomainSummary, Entity, EntityId, GraphAssembler, GraphData,
    GraphError, GraphLink, GraphNode, GraphResult, GraphRow, Label, PropertyMap, PropertyValue,
    RelType, Relationship, RelationshipRollup,
};
pub use http::{router, HttpServer};
pub use store::{GraphClient, RowSource, StoreError, StoreResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
