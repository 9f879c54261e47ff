//! HTTP handlers for the explorer API
//!
//! Handlers are thin: run the query through the [`RowSource`] seam, fold
//! the rows through the aggregation core, serialize. Any failure on either
//! side maps to a 500 with an `{"error"}` body; partial payloads are never
//! returned.

use crate::graph::{GraphAssembler, RelationshipRollup};
use crate::store::RowSource;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Query parameters for `GET /api/graph`
#[derive(Deserialize)]
pub struct GraphParams {
    pub domain: Option<String>,
}

/// Query parameters for `GET /api/domains`
#[derive(Deserialize)]
pub struct DomainParams {
    pub search: Option<String>,
}

// Browsers send `?domain=` for a cleared selector; treat it as absent.
fn non_empty(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|s| !s.is_empty())
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> axum::response::Response {
    error!(error = %e, "{} failed", context);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Handler for the node/link graph view
pub async fn graph_handler(
    State(source): State<Arc<dyn RowSource>>,
    Query(params): Query<GraphParams>,
) -> impl IntoResponse {
    let focus = non_empty(&params.domain);

    let rows = match source.graph_rows(focus).await {
        Ok(rows) => rows,
        Err(e) => return internal_error("graph query", e),
    };

    match GraphAssembler::new().assemble(rows, focus) {
        Ok(data) => Json(data).into_response(),
        Err(e) => internal_error("graph assembly", e),
    }
}

/// Handler for the per-domain rollup table
pub async fn domains_handler(
    State(source): State<Arc<dyn RowSource>>,
    Query(params): Query<DomainParams>,
) -> impl IntoResponse {
    let search = non_empty(&params.search);

    let rows = match source.domain_rows(search).await {
        Ok(rows) => rows,
        Err(e) => return internal_error("domain query", e),
    };

    match RelationshipRollup::new().summarize(rows, search) {
        Ok(summaries) => Json(summaries).into_response(),
        Err(e) => internal_error("domain rollup", e),
    }
}

/// Handler for system status
pub async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
    }))
}
