//! HTTP endpoint tests against a fake row source
//!
//! The router is generic over [`RowSource`], so these run without a
//! store: the fake mimics the upstream query's focus/search restriction
//! and can be flipped into a failing mode to exercise the error path.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dnsgraph::{
    router, DomainRow, Entity, GraphRow, Relationship, RowSource, StoreError, StoreResult,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct FakeSource {
    fail: bool,
}

impl FakeSource {
    fn rows() -> Vec<GraphRow> {
        vec![
            GraphRow::new(
                Entity::new("1", "DnsName").with_property("name", "x.com"),
                Relationship::new("RESOLVES_TO"),
                Entity::new("2", "Hostname").with_property("name", "h.x.com"),
            ),
            GraphRow::new(
                Entity::new("3", "DnsName").with_property("name", "y.com"),
                Relationship::new("RESOLVES_TO"),
                Entity::new("4", "Hostname").with_property("name", "h.y.com"),
            ),
        ]
    }
}

#[async_trait]
impl RowSource for FakeSource {
    async fn graph_rows(&self, focus: Option<&str>) -> StoreResult<Vec<GraphRow>> {
        if self.fail {
            return Err(StoreError::Decode("connection reset".to_string()));
        }
        // The real query restricts to rows touching the focused entity
        Ok(Self::rows()
            .into_iter()
            .filter(|row| match focus {
                Some(name) => {
                    row.source.name() == Some(name) || row.target.name() == Some(name)
                }
                None => true,
            })
            .collect())
    }

    async fn domain_rows(&self, search: Option<&str>) -> StoreResult<Vec<DomainRow>> {
        if self.fail {
            return Err(StoreError::Decode("connection reset".to_string()));
        }
        let rows = vec![
            DomainRow::new("x.com")
                .with_adjacent(Entity::new("2", "Hostname").with_property("name", "h.x.com"))
                .with_adjacent(Entity::new("5", "CommandRun").with_property("key", "run-1")),
            DomainRow::new("y.com"),
        ];
        // The real query applies CONTAINS before rows reach the rollup
        Ok(rows
            .into_iter()
            .filter(|row| match search {
                Some(term) => row.domain.as_deref().is_some_and(|d| d.contains(term)),
                None => true,
            })
            .collect())
    }
}

async fn get_json(fail: bool, uri: &str) -> (StatusCode, Value) {
    let app = router(Arc::new(FakeSource { fail }));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_graph_endpoint() {
    let (status, json) = get_json(false, "/api/graph").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(json["links"].as_array().unwrap().len(), 2);
    assert_eq!(json["nodes"][0]["label"], "DnsName");
    assert_eq!(json["nodes"][0]["name"], "x.com");
}

#[tokio::test]
async fn test_graph_endpoint_focused() {
    let (status, json) = get_json(false, "/api/graph?domain=x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(json["links"].as_array().unwrap().len(), 1);
    assert_eq!(json["links"][0]["type"], "RESOLVES_TO");
}

#[tokio::test]
async fn test_graph_endpoint_empty_domain_means_unscoped() {
    let (status, json) = get_json(false, "/api/graph?domain=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_domains_endpoint() {
    let (status, json) = get_json(false, "/api/domains").await;
    assert_eq!(status, StatusCode::OK);

    let summaries = json.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["domain"], "x.com");
    assert_eq!(summaries[0]["relatedHostnames"][0], "h.x.com");
    assert_eq!(summaries[0]["commandRuns"][0], "run-1");
    assert_eq!(summaries[0]["commandCount"], 1);
    assert_eq!(summaries[1]["domain"], "y.com");
    assert_eq!(summaries[1]["commandCount"], 0);
}

#[tokio::test]
async fn test_domains_endpoint_search() {
    let (status, json) = get_json(false, "/api/domains?search=y.c").await;
    assert_eq!(status, StatusCode::OK);

    let summaries = json.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["domain"], "y.com");
}

#[tokio::test]
async fn test_upstream_failure_maps_to_500() {
    let (status, json) = get_json(true, "/api/graph").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("connection reset"));

    let (status, json) = get_json(true, "/api/domains").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_status_endpoint() {
    let (status, json) = get_json(false, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], dnsgraph::VERSION);
}
