//! Bolt client for the external graph store
//!
//! The driver handle is created once at bootstrap and cloned into request
//! scope; each fetch checks a connection out of the driver's pool for the
//! duration of that one query and releases it on every exit path. There
//! is no process-global connection state.

use super::queries::{
    decode_graph_row, group_domain_rows, DOMAIN_QUERY, DOMAIN_QUERY_FILTERED, GRAPH_QUERY,
    GRAPH_QUERY_FOCUSED,
};
use super::StoreResult;
use crate::config::StoreConfig;
use crate::graph::{DomainRow, GraphRow};
use async_trait::async_trait;
use neo4rs::{query, Graph, Row};
use tracing::{debug, info};

/// Source of raw query rows for the aggregation core
///
/// The HTTP layer depends on this seam rather than on the Bolt client
/// directly, so handlers are testable against fake row sources.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Whitelist-filtered (source, relationship, target) triples,
    /// optionally scoped to rows touching one named entity
    async fn graph_rows(&self, focus: Option<&str>) -> StoreResult<Vec<GraphRow>>;

    /// Per-root one-hop adjacency rows, optionally restricted by
    /// substring match on the root name
    async fn domain_rows(&self, search: Option<&str>) -> StoreResult<Vec<DomainRow>>;
}

/// Neo4j-backed row source
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to the store described by `config`
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let graph =
            Graph::new(config.uri.as_str(), config.user.as_str(), config.password.as_str()).await?;
        info!(uri = %config.uri, user = %config.user, "connected to graph store");
        Ok(GraphClient { graph })
    }

    async fn run(&self, q: neo4rs::Query) -> StoreResult<Vec<Row>> {
        let mut stream = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for GraphClient {
    async fn graph_rows(&self, focus: Option<&str>) -> StoreResult<Vec<GraphRow>> {
        let q = match focus {
            Some(domain) => query(GRAPH_QUERY_FOCUSED).param("domain", domain),
            None => query(GRAPH_QUERY),
        };

        let raw = self.run(q).await?;
        debug!(rows = raw.len(), focus = focus.unwrap_or(""), "fetched graph rows");
        raw.iter().map(decode_graph_row).collect()
    }

    async fn domain_rows(&self, search: Option<&str>) -> StoreResult<Vec<DomainRow>> {
        let q = match search {
            Some(term) => query(DOMAIN_QUERY_FILTERED).param("search", term),
            None => query(DOMAIN_QUERY),
        };

        let raw = self.run(q).await?;
        debug!(rows = raw.len(), search = search.unwrap_or(""), "fetched domain rows");
        group_domain_rows(&raw)
    }
}
