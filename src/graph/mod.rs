//! Graph aggregation core
//!
//! This module implements the pure data-shaping layer between the external
//! graph store and the presentation layer:
//! - Typed projections of store entities and relationships
//! - GraphAssembler: deduplicated node/link graph for force-directed layout
//! - RelationshipRollup: per-domain one-hop summary records
//!
//! Everything here is synchronous and side-effect free; input rows are
//! produced by the store layer (or by test fixtures) and outputs are
//! request-scoped, never cached.

pub mod assembler;
pub mod entity;
pub mod property;
pub mod rollup;
pub mod types;

// Re-export main types
pub use assembler::{AssembleOptions, GraphAssembler, GraphData, GraphLink, GraphNode};
pub use entity::{DomainRow, Entity, GraphRow, Relationship};
pub use property::{PropertyMap, PropertyValue};
pub use rollup::{DomainSummary, RelationshipRollup};
pub use types::{EntityId, Label, RelType};

use thiserror::Error;

/// Errors produced by the aggregation core
///
/// A malformed row is an upstream contract violation, not a user error:
/// the store is expected to hand over entities that carry an identity and
/// root rows that carry a domain name. Any malformed row aborts the whole
/// assemble/summarize call; partial output is never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
