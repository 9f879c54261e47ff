//! External graph store access
//!
//! The store is a black box reached over Bolt; this module owns the two
//! Cypher queries the explorer needs, decodes driver rows into the core's
//! typed projections, and nothing else. Query planning and entity
//! population happen upstream of this process.

pub mod client;
pub mod queries;

pub use client::{GraphClient, RowSource};

use thiserror::Error;

/// Errors crossing the store boundary
///
/// Upstream failures are propagated unchanged, never swallowed; there are
/// no retries. Decode failures indicate the store returned a shape the
/// explorer's queries should never produce.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("upstream query failed: {0}")]
    Upstream(#[from] neo4rs::Error),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
