//! Relationship rollup: per-domain one-hop summary records
//!
//! Each input row bundles a root domain name with the entities adjacent to
//! it. The rollup partitions the adjacency by label into destination
//! lists, value-deduplicates each list, and counts distinct
//! command-execution entities by identity. Substring search filtering is
//! the upstream query's job; the rollup never reintroduces or removes
//! roots of its own accord.

use super::entity::DomainRow;
use super::types::EntityId;
use super::{GraphError, GraphResult};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One summary per matching root domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub domain: String,
    pub related_domains: Vec<String>,
    pub related_hostnames: Vec<String>,
    pub record_types: Vec<String>,
    pub command_runs: Vec<String>,
    pub command_count: usize,
}

/// Folds per-root adjacency rows into [`DomainSummary`] records
#[derive(Debug, Clone, Default)]
pub struct RelationshipRollup;

impl RelationshipRollup {
    pub fn new() -> Self {
        RelationshipRollup
    }

    /// Summarize one-hop adjacency, one summary per input row in input
    /// order
    ///
    /// `search` is pass-through context: when set, the caller has already
    /// restricted the roots by substring match, and the rollup does no
    /// filtering of its own. Roots are never deduplicated across rows; two
    /// distinct root entities sharing a name each yield a summary.
    pub fn summarize(
        &self,
        rows: impl IntoIterator<Item = DomainRow>,
        search: Option<&str>,
    ) -> GraphResult<Vec<DomainSummary>> {
        let summaries: Vec<DomainSummary> = rows
            .into_iter()
            .map(Self::summarize_row)
            .collect::<GraphResult<_>>()?;

        debug!(
            roots = summaries.len(),
            search = search.unwrap_or(""),
            "summarized domain rollup"
        );

        Ok(summaries)
    }

    fn summarize_row(row: DomainRow) -> GraphResult<DomainSummary> {
        let domain = row
            .domain
            .ok_or_else(|| GraphError::MalformedRow("root domain row has no name".to_string()))?;

        let mut related_domains: IndexSet<String> = IndexSet::new();
        let mut related_hostnames: IndexSet<String> = IndexSet::new();
        let mut record_types: IndexSet<String> = IndexSet::new();
        let mut command_runs: IndexSet<String> = IndexSet::new();
        let mut run_identities: HashSet<EntityId> = HashSet::new();

        for entity in &row.adjacent {
            if entity.has_label("DnsName") {
                collect_value(&mut related_domains, entity.name());
            }
            if entity.has_label("Hostname") {
                collect_value(&mut related_hostnames, entity.name());
            }
            if entity.has_label("RecordType") {
                collect_value(&mut record_types, entity.name());
            }
            if entity.has_label("CommandRun") {
                // Distinct count is by identity, not by key value
                let id = entity.require_identity("adjacent CommandRun")?;
                run_identities.insert(id.clone());
                collect_value(&mut command_runs, entity.key());
            }
        }

        Ok(DomainSummary {
            domain,
            related_domains: related_domains.into_iter().collect(),
            related_hostnames: related_hostnames.into_iter().collect(),
            record_types: record_types.into_iter().collect(),
            command_runs: command_runs.into_iter().collect(),
            command_count: run_identities.len(),
        })
    }
}

// The store's list projections drop entities whose projected property is
// null; mirror that here instead of inventing placeholder values.
fn collect_value(set: &mut IndexSet<String>, value: Option<&str>) {
    if let Some(v) = value {
        set.insert(v.to_string());
    }
}
